//! Generic A* engine.
//!
//! The engine knows nothing about roads.  A [`SearchProblem`] supplies the
//! state type, successor costs, heuristic, and goal test; the engine owns all
//! per-query bookkeeping:
//!
//! - `records`: an arena of search records (`g`, `h`, predecessor index).
//! - `best_g`: best known cost-so-far per state.
//! - `closed`: states already finalized.
//! - `frontier`: a binary heap of arena indices ordered by `f = g + h`.
//!
//! Nothing is written back into the problem, so a shared graph can serve any
//! number of concurrent searches.
//!
//! # Ordering
//!
//! The frontier pops the minimum `f`.  Ties are broken by the smaller state
//! (`State: Ord`), then by insertion order, which makes results reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};

use wf_core::SearchConfig;

// ── Problem definition ────────────────────────────────────────────────────────

/// A state space searchable by [`astar`].
///
/// Implementations are plain structs borrowed for the duration of one query;
/// dispatch is static.
pub trait SearchProblem {
    type State: Copy + Eq + Hash + Ord;

    /// Successor states with the cost of the step to each.
    fn successors(&self, state: Self::State) -> impl Iterator<Item = (Self::State, f64)>;

    /// Admissible estimate of the remaining cost from `state` to a goal.
    fn heuristic(&self, state: Self::State) -> f64;

    fn is_goal(&self, state: Self::State) -> bool;
}

/// Wraps a problem and replaces its heuristic with zero, turning A* into
/// Dijkstra's algorithm over the same state space.
pub struct Uninformed<'p, P>(pub &'p P);

impl<P: SearchProblem> SearchProblem for Uninformed<'_, P> {
    type State = P::State;

    fn successors(&self, state: P::State) -> impl Iterator<Item = (P::State, f64)> {
        self.0.successors(state)
    }

    fn heuristic(&self, _state: P::State) -> f64 {
        0.0
    }

    fn is_goal(&self, state: P::State) -> bool {
        self.0.is_goal(state)
    }
}

// ── Limits ────────────────────────────────────────────────────────────────────

/// Cooperative cancellation flag shared between a query and its controller.
///
/// Cloning shares the flag.  The search checks it once per frontier pop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Budget for a single search.  The default is unbounded.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub cancel:   Option<CancelToken>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Limits whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { deadline: Some(Instant::now() + timeout), cancel: None }
    }

    /// Limits for one query under `config`; the deadline starts now.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            deadline: config.timeout().map(|t| Instant::now() + t),
            cancel:   None,
        }
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Successful search result.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S> {
    /// States from start to goal inclusive.
    pub path:     Vec<S>,
    /// Total cost of `path`.
    pub cost:     f64,
    /// Number of states closed before the goal was popped.
    pub expanded: usize,
}

/// Why a search stopped without reaching a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchFailure {
    /// The frontier emptied: no goal is reachable.
    Exhausted { expanded: usize },
    Cancelled,
    Timeout { elapsed: Duration },
}

// ── Per-query state ───────────────────────────────────────────────────────────

/// One frontier record.  Records are never mutated after being pushed; an
/// improvement pushes a new record and the old one goes stale.
#[derive(Debug, Clone, Copy)]
struct SearchRecord<S> {
    state:  S,
    g:      f64,
    h:      f64,
    parent: Option<usize>,
}

impl<S> SearchRecord<S> {
    #[inline]
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Heap entry pointing into the record arena.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry<S> {
    f:      f64,
    state:  S,
    record: usize,
}

impl<S: Ord> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest `f` first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.state.cmp(&self.state))
            .then_with(|| other.record.cmp(&self.record))
    }
}

impl<S: Ord> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Ord> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Ord> Eq for FrontierEntry<S> {}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Run A* from `start` until a goal state is popped.
///
/// With an admissible, consistent heuristic the returned path is optimal.
pub fn astar<P: SearchProblem>(
    problem: &P,
    start: P::State,
    limits: &SearchLimits,
) -> Result<SearchOutcome<P::State>, SearchFailure> {
    let started = Instant::now();

    let mut records: Vec<SearchRecord<P::State>> = Vec::new();
    let mut best_g: FxHashMap<P::State, f64> = FxHashMap::default();
    let mut closed: FxHashSet<P::State> = FxHashSet::default();
    let mut frontier: BinaryHeap<FrontierEntry<P::State>> = BinaryHeap::new();

    records.push(SearchRecord { state: start, g: 0.0, h: problem.heuristic(start), parent: None });
    best_g.insert(start, 0.0);
    frontier.push(FrontierEntry { f: records[0].f(), state: start, record: 0 });

    while let Some(entry) = frontier.pop() {
        if let Some(token) = &limits.cancel {
            if token.is_cancelled() {
                return Err(SearchFailure::Cancelled);
            }
        }
        if let Some(deadline) = limits.deadline {
            if Instant::now() >= deadline {
                return Err(SearchFailure::Timeout { elapsed: started.elapsed() });
            }
        }

        let current = records[entry.record];
        if problem.is_goal(current.state) {
            return Ok(SearchOutcome {
                path:     reconstruct(&records, entry.record),
                cost:     current.g,
                expanded: closed.len(),
            });
        }

        // Skip stale heap entries.
        if !closed.insert(current.state) {
            continue;
        }

        for (next, step) in problem.successors(current.state) {
            if closed.contains(&next) {
                continue;
            }
            let tentative_g = current.g + step;
            let improves = best_g.get(&next).is_none_or(|&g| tentative_g < g);
            if improves {
                best_g.insert(next, tentative_g);
                let record = records.len();
                records.push(SearchRecord {
                    state:  next,
                    g:      tentative_g,
                    h:      problem.heuristic(next),
                    parent: Some(entry.record),
                });
                frontier.push(FrontierEntry { f: records[record].f(), state: next, record });
            }
        }
    }

    Err(SearchFailure::Exhausted { expanded: closed.len() })
}

fn reconstruct<S: Copy>(records: &[SearchRecord<S>], goal_record: usize) -> Vec<S> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_record);
    while let Some(i) = cursor {
        path.push(records[i].state);
        cursor = records[i].parent;
    }
    path.reverse();
    path
}
