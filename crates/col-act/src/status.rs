//! The tri-state result of one tick.

use std::fmt;

/// Result of ticking an act once.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Status {
    /// Not finished; tick again next frame.
    Running,
    Success,
    Fail,
}

impl Status {
    /// `Success` or `Fail`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }

    /// Map a boolean outcome onto `Success` / `Fail`.
    #[inline]
    pub fn from_bool(ok: bool) -> Status {
        if ok { Status::Success } else { Status::Fail }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Success => "success",
            Status::Fail    => "fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
