use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::index::{FrequencyIndex, InOrder};
use crate::route::Route;

/// Outcome of recording a delivery against the registry.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    pub route_id: String,
    pub frequency: u32,
    pub total_cost: f64,
    pub charging_stops: Vec<NodeId>,
}

/// Aggregate usage figures for the analytics views.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteStats {
    pub unique_routes: usize,
    pub total_trips: u64,
    pub mean_frequency: f64,
}

/// Owner of the route catalogue for a simulation session.
///
/// Routes are keyed by node-sequence identity and ranked by usage in the
/// embedded [`FrequencyIndex`]. The lookup, frequency increment, and
/// index reposition for a delivery happen inside one `&mut self` call,
/// so the index never holds an entry filed under a stale frequency; a
/// session sharing the registry across threads wraps it in a `Mutex`.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    index: FrequencyIndex,
    next_id: u64,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delivery over `nodes`, minting a route on first use and
    /// bumping the existing entry otherwise.
    ///
    /// `nodes` must be an actual search result: a sequence of at least
    /// two nodes connected edge-by-edge in `graph`.
    pub fn record(&mut self, graph: &Graph, nodes: Vec<NodeId>) -> Result<RouteRecord> {
        if nodes.len() < 2 {
            return Err(Error::EmptyRoute);
        }

        let frequency = match self.index.bump(&nodes) {
            Some(frequency) => frequency,
            None => {
                self.next_id += 1;
                let mut route = Route::new(format!("R{}", self.next_id), nodes.clone())?;
                route.compute_total_cost(graph)?;
                route.identify_charging_stops();
                debug!(route_id = route.id(), "registered new route");
                self.index.insert(route)
            }
        };

        let route = self
            .index
            .get(&nodes)
            .ok_or_else(|| Error::DisconnectedRoute {
                from: nodes[0].clone(),
                to: nodes[nodes.len() - 1].clone(),
            })?;

        Ok(RouteRecord {
            route_id: route.id().to_string(),
            frequency,
            total_cost: route.total_cost().unwrap_or(0.0),
            charging_stops: route.charging_stops().to_vec(),
        })
    }

    /// Look up a route by its node-sequence identity.
    pub fn get(&self, nodes: &[NodeId]) -> Option<&Route> {
        self.index.get(nodes)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Routes in ascending rank order (least used first).
    pub fn ranked(&self) -> InOrder<'_> {
        self.index.in_order()
    }

    pub fn stats(&self) -> RouteStats {
        let unique_routes = self.index.len();
        let total_trips: u64 = self
            .index
            .in_order()
            .map(|route| u64::from(route.frequency()))
            .sum();
        let mean_frequency = if unique_routes == 0 {
            0.0
        } else {
            total_trips as f64 / unique_routes as f64
        };
        RouteStats {
            unique_routes,
            total_trips,
            mean_frequency,
        }
    }
}
