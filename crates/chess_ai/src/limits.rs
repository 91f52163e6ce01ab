//! Search limits and the wall-clock budget.
//!
//! The budget is cooperative: the clock is sampled once when the search
//! starts and checked at node entry, so the search may modestly overrun the
//! requested time while finishing shallow subtrees.

use std::time::{Duration, Instant};

use crate::ordering::MAX_SEARCH_PLY;

/// Limits for one search invocation: a depth cap and an optional time budget.
#[derive(Clone, Debug)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth in plies.
    pub max_depth: u8,
    /// Wall-clock budget for the whole search (None = unbounded).
    pub budget: Option<Duration>,
}

impl SearchLimits {
    /// Depth-only limits, no clock.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            budget: None,
        }
    }

    /// Time-only limits; depth is bounded by the killer-table ply cap.
    pub fn time(budget: Duration) -> Self {
        Self {
            max_depth: MAX_SEARCH_PLY as u8,
            budget: Some(budget),
        }
    }

    pub fn depth_and_time(max_depth: u8, budget: Duration) -> Self {
        Self {
            max_depth,
            budget: Some(budget),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::time(Duration::from_millis(2000))
    }
}

/// Deadline sampled at search start and threaded down the call tree.
#[derive(Clone, Copy, Debug)]
pub struct SearchClock {
    started: Instant,
    budget: Option<Duration>,
}

impl SearchClock {
    pub fn start(budget: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once the budget is spent. Never true for unbounded searches.
    pub fn expired(&self) -> bool {
        match self.budget {
            Some(budget) => self.started.elapsed() > budget,
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod limits_tests;
