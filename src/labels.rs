//! Flat label storage over the augmented (position, heading, run) space.
//!
//! Labels live in one arena-indexed array rather than a hash map: the
//! augmented space is small and dense enough that flattening a state into
//! a single index beats hashing, and "no label yet" is an explicit
//! sentinel instead of a map miss.

use crate::grid::{Direction, Position, ALL_DIRECTIONS};

/// Sentinel for a slot that has never been labeled.
const UNLABELED: u32 = u32::MAX;

/// One node of the augmented search space: a grid cell entered while
/// travelling `heading`, with `run` consecutive cells taken on that
/// heading so far (`1..=max_run`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunState {
    pub pos: Position,
    pub heading: Direction,
    pub run: u8,
}

/// Best known cumulative cost per augmented state.
///
/// Values only ever decrease; [`LabelStore::improve`] is the sole mutation.
#[derive(Debug)]
pub struct LabelStore {
    width: usize,
    max_run: u8,
    labels: Vec<u32>,
}

impl LabelStore {
    pub fn new(width: usize, height: usize, max_run: u8) -> Self {
        let slots = width * height * ALL_DIRECTIONS.len() * max_run as usize;
        Self {
            width,
            max_run,
            labels: vec![UNLABELED; slots],
        }
    }

    fn index(&self, state: RunState) -> usize {
        debug_assert!(state.run >= 1 && state.run <= self.max_run);
        let cell = state.pos.y as usize * self.width + state.pos.x as usize;
        (cell * ALL_DIRECTIONS.len() + state.heading.index()) * self.max_run as usize
            + (state.run as usize - 1)
    }

    /// Best cost known for `state`, if it has been reached at all.
    pub fn get(&self, state: RunState) -> Option<u32> {
        let value = self.labels[self.index(state)];
        (value != UNLABELED).then_some(value)
    }

    /// Record `cost` for `state` if it strictly improves on the stored
    /// label. Returns true when the label changed.
    pub fn improve(&mut self, state: RunState, cost: u32) -> bool {
        let idx = self.index(state);
        let slot = &mut self.labels[idx];
        if cost < *slot {
            *slot = cost;
            true
        } else {
            false
        }
    }

    /// Smallest label at `pos` over every heading and every run length in
    /// `min_run..=max_run`. Arrivals that stopped short of `min_run` are
    /// never considered, no matter how cheap.
    pub fn best_at(&self, pos: Position, min_run: u8) -> Option<u32> {
        let mut best: Option<u32> = None;
        for heading in ALL_DIRECTIONS {
            for run in min_run..=self.max_run {
                if let Some(cost) = self.get(RunState { pos, heading, run }) {
                    best = Some(best.map_or(cost, |b| b.min(cost)));
                }
            }
        }
        best
    }
}
