//! High-level delivery planning.
//!
//! [`plan_delivery`] ties the core together: it validates the request,
//! runs the autonomy-constrained path search, records the resulting
//! route in the registry, and returns a [`DeliveryPlan`] for the caller
//! to attach to an order or render. The graph is never mutated.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::find_path;
use crate::registry::RouteRegistry;

/// A single delivery request between two network nodes.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub origin: String,
    pub destination: String,
    /// Maximum cumulative edge cost between recharges.
    pub capacity: f64,
}

impl DeliveryRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, capacity: f64) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            capacity,
        }
    }
}

/// One traversed edge of a planned delivery, with the drone's energy
/// after arrival.
#[derive(Debug, Clone, Serialize)]
pub struct Leg {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
    /// Energy remaining after arriving at `to`, post-recharge if `to` is
    /// a charging node.
    pub energy_after: f64,
    pub recharged: bool,
}

/// Planned delivery returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryPlan {
    /// Registry identifier of the recorded route. `None` only for the
    /// degenerate origin == destination case, which is not recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    pub steps: Vec<NodeId>,
    pub total_cost: f64,
    pub charging_stops: Vec<NodeId>,
    pub frequency: u32,
    pub capacity: f64,
}

impl DeliveryPlan {
    /// Number of hops in the planned route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Replay the plan edge by edge, narrating cost and energy per hop.
    pub fn legs(&self, graph: &Graph) -> Result<Vec<Leg>> {
        let mut legs = Vec::with_capacity(self.hop_count());
        let mut energy = self.capacity;
        for pair in self.steps.windows(2) {
            let cost =
                graph
                    .edge_weight(&pair[0], &pair[1])
                    .ok_or_else(|| Error::DisconnectedRoute {
                        from: pair[0].clone(),
                        to: pair[1].clone(),
                    })?;
            energy -= cost;
            let recharged = graph.is_charging(&pair[1]);
            if recharged {
                energy = self.capacity;
            }
            legs.push(Leg {
                from: pair[0].clone(),
                to: pair[1].clone(),
                cost,
                energy_after: energy,
                recharged,
            });
        }
        Ok(legs)
    }
}

/// Plan a delivery and record the resulting route.
///
/// Fails with [`Error::InvalidCapacity`] for non-positive capacities and
/// otherwise propagates the path search outcome. A successful plan has
/// already been counted in the registry's frequency index.
pub fn plan_delivery(
    graph: &Graph,
    registry: &mut RouteRegistry,
    request: &DeliveryRequest,
) -> Result<DeliveryPlan> {
    if !(request.capacity > 0.0) {
        return Err(Error::InvalidCapacity {
            capacity: request.capacity,
        });
    }

    let steps = find_path(graph, &request.origin, &request.destination, request.capacity)?;

    if steps.len() < 2 {
        // Delivering to the origin itself traverses nothing and leaves
        // the route history untouched.
        return Ok(DeliveryPlan {
            route_id: None,
            steps,
            total_cost: 0.0,
            charging_stops: Vec::new(),
            frequency: 0,
            capacity: request.capacity,
        });
    }

    let record = registry.record(graph, steps.clone())?;
    Ok(DeliveryPlan {
        route_id: Some(record.route_id),
        steps,
        total_cost: record.total_cost,
        charging_stops: record.charging_stops,
        frequency: record.frequency,
        capacity: request.capacity,
    })
}
