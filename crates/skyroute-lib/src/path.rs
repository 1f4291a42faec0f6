use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// Default cap on state expansions before a search is abandoned.
pub const DEFAULT_MAX_EXPANSIONS: usize = 200_000;

/// Bounds applied to a single path search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum number of `(node, energy)` states the search may expand.
    pub max_expansions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Search state: a node together with the energy remaining on arrival.
///
/// Energy is keyed by its bit pattern. Costs accumulate deterministically
/// along each path, so equal states always hash equally; at worst two
/// arithmetically equal energies from different paths differ in the last
/// ulp and are explored as distinct states, which costs time, not
/// correctness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SearchState {
    node: NodeId,
    energy_bits: u64,
}

impl SearchState {
    fn new(node: &str, energy: f64) -> Self {
        Self {
            node: node.to_string(),
            energy_bits: energy.to_bits(),
        }
    }

    fn energy(&self) -> f64 {
        f64::from_bits(self.energy_bits)
    }
}

/// Find an energy-feasible node sequence from `origin` to `destination`.
///
/// The drone starts with `capacity` energy units; traversing an edge
/// spends its weight, and arriving at a charging node restores the full
/// capacity. The returned sequence never spends more than `capacity`
/// between two consecutive recharges. Uses [`SearchLimits::default`].
pub fn find_path(
    graph: &Graph,
    origin: &str,
    destination: &str,
    capacity: f64,
) -> Result<Vec<NodeId>> {
    find_path_with_limits(graph, origin, destination, capacity, &SearchLimits::default())
}

/// Dijkstra over the `(node, energy remaining)` state space.
///
/// States are expanded in non-decreasing order of accumulated cost, so
/// the first destination state popped closes the cheapest feasible path
/// found. Infeasibility is reported as [`Error::NoViablePath`], never as
/// a truncated sequence.
pub fn find_path_with_limits(
    graph: &Graph,
    origin: &str,
    destination: &str,
    capacity: f64,
    limits: &SearchLimits,
) -> Result<Vec<NodeId>> {
    if !graph.contains(origin) {
        return Err(Error::UnknownNode {
            id: origin.to_string(),
        });
    }
    if !graph.contains(destination) {
        return Err(Error::UnknownNode {
            id: destination.to_string(),
        });
    }
    if origin == destination {
        return Ok(vec![origin.to_string()]);
    }

    let start = SearchState::new(origin, capacity);
    let mut best: HashMap<SearchState, f64> = HashMap::new();
    let mut parents: HashMap<SearchState, SearchState> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(start.clone(), 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    let mut expansions = 0usize;
    while let Some(entry) = queue.pop() {
        let cost = entry.cost.0;
        if best.get(&entry.state).is_none_or(|&d| cost > d) {
            continue;
        }

        if entry.state.node == destination {
            debug!(origin, destination, cost, expansions, "path found");
            return Ok(reconstruct_path(&parents, &entry.state));
        }

        expansions += 1;
        if expansions > limits.max_expansions {
            return Err(Error::SearchBudgetExhausted {
                expansions: limits.max_expansions,
            });
        }

        let energy = entry.state.energy();
        for edge in graph.neighbours(&entry.state.node) {
            if edge.weight > energy {
                continue;
            }
            // Recharging is a property of arriving at a charging node,
            // not a separate action.
            let next_energy = if graph.is_charging(&edge.target) {
                capacity
            } else {
                energy - edge.weight
            };
            let next = SearchState::new(&edge.target, next_energy);
            let next_cost = cost + edge.weight;
            if next_cost < *best.get(&next).unwrap_or(&f64::INFINITY) {
                best.insert(next.clone(), next_cost);
                parents.insert(next.clone(), entry.state.clone());
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(origin, destination, capacity, expansions, "queue exhausted");
    Err(Error::NoViablePath {
        origin: origin.to_string(),
        destination: destination.to_string(),
        capacity,
    })
}

fn reconstruct_path(parents: &HashMap<SearchState, SearchState>, goal: &SearchState) -> Vec<NodeId> {
    let mut path = vec![goal.node.clone()];
    let mut current = goal;
    while let Some(previous) = parents.get(current) {
        path.push(previous.node.clone());
        current = previous;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    state: SearchState,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(state: SearchState, cost: f64) -> Self {
        Self {
            state,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost; the
        // node tie-break keeps expansion order deterministic.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.node.cmp(&self.state.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
