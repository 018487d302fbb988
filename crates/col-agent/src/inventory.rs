//! Per-agent inventory of tagged resources.

use std::collections::BTreeMap;

/// Item counts keyed by resource tag (`"stone"`, `"wood"`, …).
///
/// `BTreeMap` keeps iteration order stable so output is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.items.entry(tag.to_owned()).or_default() += count;
    }

    /// Remove `count` of `tag`.  Returns `false` (and removes nothing) if the
    /// inventory holds fewer than `count`.
    pub fn remove(&mut self, tag: &str, count: u32) -> bool {
        let Some(held) = self.items.get_mut(tag) else {
            return count == 0;
        };
        if *held < count {
            return false;
        }
        *held -= count;
        if *held == 0 {
            self.items.remove(tag);
        }
        true
    }

    #[inline]
    pub fn count(&self, tag: &str) -> u32 {
        self.items.get(tag).copied().unwrap_or(0)
    }

    #[inline]
    pub fn has(&self, tag: &str, count: u32) -> bool {
        self.count(tag) >= count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.items.iter().map(|(tag, &n)| (tag.as_str(), n))
    }
}
