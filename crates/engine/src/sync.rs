use std::fmt;

use crate::{
    EngineError,
    error::LOAD_FAILED_MESSAGE,
    snapshot::{AggregateSnapshot, Holdings},
};

/// Position of a cycle in start order. Allocated from a monotonically
/// increasing counter before the reads are sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleSeq(u64);

impl CycleSeq {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Successful read of the three collections plus the derived metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    pub snapshot: AggregateSnapshot,
    pub holdings: Holdings,
}

impl Loaded {
    pub fn new(holdings: Holdings) -> Self {
        Self {
            snapshot: holdings.snapshot(),
            holdings,
        }
    }
}

/// Result of one aggregation cycle.
#[derive(Clone, Debug)]
pub struct Cycle {
    pub seq: CycleSeq,
    pub outcome: Result<Loaded, EngineError>,
}

/// What the dashboard currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(Loaded),
    /// The last applied cycle failed; carries the user-facing message only.
    Failed(String),
}

/// Applies cycles in start order.
///
/// A cycle that started before the last applied one is dropped, so a slow
/// read can never overwrite the result of a newer refresh.
#[derive(Debug, Default)]
pub struct SyncState {
    last_applied: Option<CycleSeq>,
    state: DashboardState,
}

impl SyncState {
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn last_applied(&self) -> Option<CycleSeq> {
        self.last_applied
    }

    /// Replaces the whole state with the cycle outcome. Returns `false` when
    /// the cycle is stale and was discarded.
    pub fn apply(&mut self, cycle: Cycle) -> bool {
        if let Some(last) = self.last_applied {
            if cycle.seq <= last {
                tracing::debug!("discarding stale cycle {} (last applied {last})", cycle.seq);
                return false;
            }
        }

        self.last_applied = Some(cycle.seq);
        self.state = match cycle.outcome {
            Ok(loaded) => DashboardState::Ready(loaded),
            Err(_) => DashboardState::Failed(LOAD_FAILED_MESSAGE.to_string()),
        };
        true
    }

    /// Drops everything shown, e.g. after logout.
    pub fn reset(&mut self) {
        self.state = DashboardState::Loading;
    }
}
