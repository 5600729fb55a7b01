//! Reorders streamed results into (year, day, part) order
//!
//! Expected keys sit in a min-heap; results that arrive early wait in a
//! sorted buffer until every key before them has been released.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer `result` and release the longest complete prefix
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&Reverse(next)) = self.expected.peek() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.expected.pop();
            ready.push(result);
        }
        ready
    }

    /// Everything still buffered, in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
