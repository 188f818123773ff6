//! Mount lifecycle of one shader component.
//!
//! `Unloaded -> Loading -> Ready -> Animating`, with `TornDown` reachable from
//! every phase on unmount and `LoadFailed` absorbing a failed load.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loading,
    Ready,
    Animating,
    LoadFailed,
    TornDown,
}

impl Phase {
    /// No further draws or initialization can happen from this phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::LoadFailed | Phase::TornDown)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Unloaded => "unloaded",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Animating => "animating",
            Phase::LoadFailed => "load-failed",
            Phase::TornDown => "torn-down",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot {action} while {phase}")]
    IllegalTransition { action: &'static str, phase: Phase },
    #[error("component was torn down before the load finished")]
    TornDownDuringLoad,
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unloaded,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start the one load allowed per mount.
    pub fn begin_load(&mut self) -> Result<(), LifecycleError> {
        self.transition("begin load", Phase::Unloaded, Phase::Loading)
    }

    /// Record a successful load. Fails with `TornDownDuringLoad` when the
    /// component was unmounted meanwhile; the caller must then drop the
    /// loaded backend without initializing anything.
    pub fn finish_load(&mut self) -> Result<(), LifecycleError> {
        if self.phase == Phase::TornDown {
            return Err(LifecycleError::TornDownDuringLoad);
        }
        self.transition("finish load", Phase::Loading, Phase::Ready)
    }

    /// Record a failed load. A component already torn down stays torn down.
    pub fn fail_load(&mut self) -> Result<(), LifecycleError> {
        if self.phase == Phase::TornDown {
            return Ok(());
        }
        self.transition("fail load", Phase::Loading, Phase::LoadFailed)
    }

    pub fn start_animating(&mut self) -> Result<(), LifecycleError> {
        self.transition("start animating", Phase::Ready, Phase::Animating)
    }

    /// Unmount. Valid from every phase; returns the phase that was left.
    pub fn tear_down(&mut self) -> Phase {
        let previous = self.phase;
        if previous != Phase::TornDown {
            log::debug!("[lifecycle] {} -> {}", previous, Phase::TornDown);
        }
        self.phase = Phase::TornDown;
        previous
    }

    fn transition(
        &mut self,
        action: &'static str,
        from: Phase,
        to: Phase,
    ) -> Result<(), LifecycleError> {
        if self.phase != from {
            return Err(LifecycleError::IllegalTransition {
                action,
                phase: self.phase,
            });
        }
        log::debug!("[lifecycle] {} -> {}", from, to);
        self.phase = to;
        Ok(())
    }
}
