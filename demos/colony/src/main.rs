//! colony: a small crew digging out a quarry face.
//!
//! Six agents share one faction's task queue: a row of dig designations
//! along the quarry wall and a handful of stones to haul to the stockpile.
//! Idle agents loiter for a few ticks and then check the queue again.
//!
//! Usage: `colony [config.json]`.  Without an argument the built-in
//! configuration below is used; any field missing from the JSON file keeps
//! its default.  Set `RUST_LOG=debug` for per-tick logging.

mod quarry;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use col_act::{BoxAct, IntoBoxAct, Wait};
use col_agent::{AgentStore, AgentStoreBuilder, AgentView};
use col_core::{AgentRng, FactionId, SchedulerConfig, Tick};
use col_output::{CsvWriter, OutputWriter, SchedOutputObserver};
use col_plan::AStarPlanner;
use col_sched::{SchedulerBuilder, SchedulerObserver, TickSummary};
use col_task::{Colony, DigTask, GatherTask, IdleBehavior, ScriptSlots, TaskEvent, TaskEventKind, TaskManager};

use quarry::build_quarry;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 6;
const SEED:        u64   = 42;
const OUTPUT_DIR:  &str  = "output/colony";

// ── Idle behavior ─────────────────────────────────────────────────────────────

/// Stand around for one to four ticks.
struct Loiter;

impl IdleBehavior for Loiter {
    fn idle_script(&mut self, _agent: &AgentView<'_>, _colony: &Colony, rng: &mut AgentRng) -> Option<BoxAct<Colony>> {
        Some(Wait::new(rng.gen_range(1..=4)).boxed())
    }
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     SchedOutputObserver<W>,
    completed: usize,
    failed:    usize,
    summaries: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SchedOutputObserver<W>) -> Self {
        Self { inner, completed: 0, failed: 0, summaries: 0 }
    }
}

impl<W: OutputWriter> SchedulerObserver for CountingObserver<W> {
    fn on_task_event(&mut self, event: &TaskEvent) {
        match event.kind {
            TaskEventKind::Completed => self.completed += 1,
            TaskEventKind::Failed    => self.failed += 1,
            _                        => {}
        }
        self.inner.on_task_event(event);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries += 1;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, slots: &ScriptSlots) {
        self.inner.on_snapshot(tick, agents, slots);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>) -> Result<SchedulerConfig> {
    let Some(path) = path else {
        return Ok(SchedulerConfig { total_ticks: 400, seed: SEED, output_interval_ticks: 10, ..SchedulerConfig::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let config: SchedulerConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!(
        agents = AGENT_COUNT,
        ticks = config.total_ticks,
        seed = config.seed,
        plan_budget = config.plan_budget_per_tick,
        "colony demo starting"
    );

    // 1. World and crew.
    let (world, face, stones) = build_quarry();
    let (store, rngs) = AgentStoreBuilder::new(AGENT_COUNT, config.seed).build();

    // 2. Scheduler with a loitering crew.
    let crew = FactionId(0);
    let mut sched = SchedulerBuilder::new(config.clone(), store, rngs, world, AStarPlanner)
        .manager(TaskManager::new(crew).with_idle_behavior(Loiter))
        .build()?;

    // 3. Designations.
    for &voxel in &face {
        sched.add_task(crew, DigTask::new(voxel))?;
    }
    for &stone in &stones {
        sched.add_task(crew, GatherTask::new(stone, 1))?;
    }
    info!(dig = face.len(), gather = stones.len(), "tasks queued");

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SchedOutputObserver::new(writer, &config));

    // 5. Run.
    let t0 = Instant::now();
    sched.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }

    // 6. Summary.
    let world = &sched.colony.world;
    let remaining = face.iter().filter(|&&v| world.is_solid(v)).count();
    let plans = sched.colony.plans.stats();
    println!("Run complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), obs.summaries);
    println!("  tasks completed : {}", obs.completed);
    println!("  script failures : {}", obs.failed);
    println!("  still queued    : {}", sched.queued_tasks());
    println!("  rock remaining  : {remaining} / {}", face.len());
    println!("  stones stocked  : {}", if world.has_resources("stone", 1) { "yes" } else { "no" });
    println!("  plans solved    : {}", plans.solved);
    for line in world.announcements() {
        println!("  ! {line}");
    }
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
