use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, NodeRole};

/// A delivery route: an ordered node sequence with its usage frequency,
/// cached total cost, and derived charging stops.
///
/// Identity is the ordered node sequence alone; the identifier and the
/// frequency counter are bookkeeping and take no part in equality or
/// hashing.
#[derive(Debug, Clone)]
pub struct Route {
    id: String,
    nodes: Vec<NodeId>,
    frequency: u32,
    total_cost: Option<f64>,
    charging_stops: Vec<NodeId>,
}

impl Route {
    /// Create a route over at least two nodes with frequency 1. The total
    /// cost and charging stops stay empty until computed.
    pub fn new(id: impl Into<String>, nodes: Vec<NodeId>) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(Error::EmptyRoute);
        }
        Ok(Self {
            id: id.into(),
            nodes,
            frequency: 1,
            total_cost: None,
            charging_stops: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Cached total cost, `None` until [`Route::compute_total_cost`] runs.
    pub fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }

    pub fn charging_stops(&self) -> &[NodeId] {
        &self.charging_stops
    }

    /// Sum the weights of each consecutive edge in the sequence, cache the
    /// result, and return it. Fails with [`Error::DisconnectedRoute`] when
    /// a consecutive pair has no edge in the graph.
    pub fn compute_total_cost(&mut self, graph: &Graph) -> Result<f64> {
        let mut total = 0.0;
        for pair in self.nodes.windows(2) {
            let weight =
                graph
                    .edge_weight(&pair[0], &pair[1])
                    .ok_or_else(|| Error::DisconnectedRoute {
                        from: pair[0].clone(),
                        to: pair[1].clone(),
                    })?;
            total += weight;
        }
        self.total_cost = Some(total);
        Ok(total)
    }

    /// Filter the sequence down to its charging nodes. Idempotent.
    pub fn identify_charging_stops(&mut self) -> &[NodeId] {
        self.charging_stops = self
            .nodes
            .iter()
            .filter(|id| NodeRole::from_id(id) == Some(NodeRole::Charging))
            .cloned()
            .collect();
        &self.charging_stops
    }

    pub fn increment_frequency(&mut self) {
        self.frequency += 1;
    }

    /// Coarse feasibility check: whether the cached total cost fits within
    /// `capacity` in one charge.
    ///
    /// This ignores recharging entirely, so it can reject routes the
    /// charging-aware path search accepts. It is a local heuristic, not a
    /// substitute for re-running [`crate::path::find_path`]. Returns
    /// `false` until the total cost has been computed.
    pub fn is_viable(&self, capacity: f64) -> bool {
        self.total_cost.is_some_and(|cost| cost <= capacity)
    }

    /// The single total order routes are ranked by: frequency ascending,
    /// ties broken by lexicographic node-sequence comparison. Every
    /// relational use of routes derives from this one comparator.
    pub fn rank_cmp(&self, other: &Route) -> Ordering {
        self.frequency
            .cmp(&other.frequency)
            .then_with(|| self.nodes.as_slice().cmp(other.nodes.as_slice()))
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes.join(" -> "))?;
        write!(f, " (freq {}", self.frequency)?;
        if let Some(cost) = self.total_cost {
            write!(f, ", cost {cost:.2}")?;
        }
        write!(f, ")")?;
        if !self.charging_stops.is_empty() {
            write!(f, " [recharge at: {}]", self.charging_stops.join(", "))?;
        }
        Ok(())
    }
}
