//! # Cycle Scheduler
//!
//! Counts cycles and decides, per cycle, which strategy is active and whether
//! an injection is due. Timing itself lives in the service; this type only
//! reacts to `advance()`.
//!
//! ## Cadence
//!
//! - Injection is due iff `cycle % rotation_period == 0` and the active
//!   strategy injects.
//! - In demo mode the strategy advances when
//!   `(cycle - 1) % rotation_period == 0`, i.e. on the first cycle of every
//!   rotation, cycling through [`SpoofMode::ROTATION`].

use shared_types::SpoofMode;

/// Outcome of one scheduler step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTick {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Strategy in effect for this cycle.
    pub strategy: Option<SpoofMode>,
    /// Set when demo mode switched strategy on this cycle.
    pub switched_to: Option<SpoofMode>,
    /// Whether the assembler should inject on this cycle.
    pub injection_due: bool,
}

/// Cycle counter and strategy selector for one session.
#[derive(Debug, Clone)]
pub struct CycleScheduler {
    mode: SpoofMode,
    rotation_period: u64,
    cycle_count: u64,
    rotation_index: usize,
    active: Option<SpoofMode>,
}

impl CycleScheduler {
    /// Create a scheduler. A zero rotation period is treated as 1.
    pub fn new(mode: SpoofMode, rotation_period: u64) -> Self {
        Self {
            mode,
            rotation_period: rotation_period.max(1),
            cycle_count: 0,
            rotation_index: 0,
            active: if mode.is_demo() { None } else { Some(mode) },
        }
    }

    pub fn mode(&self) -> SpoofMode {
        self.mode
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn active_strategy(&self) -> Option<SpoofMode> {
        self.active
    }

    /// Fire one cycle.
    pub fn advance(&mut self) -> CycleTick {
        self.cycle_count += 1;
        let cycle = self.cycle_count;

        let mut switched_to = None;
        if self.mode.is_demo() && (cycle - 1) % self.rotation_period == 0 {
            let next = SpoofMode::ROTATION[self.rotation_index];
            self.rotation_index = (self.rotation_index + 1) % SpoofMode::ROTATION.len();
            self.active = Some(next);
            switched_to = Some(next);
        }

        let injection_due = cycle % self.rotation_period == 0
            && self.active.map_or(false, |s| s.injects());

        CycleTick {
            cycle,
            strategy: self.active,
            switched_to,
            injection_due,
        }
    }
}
