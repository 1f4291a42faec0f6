//! Skyroute library entry points.
//!
//! This crate models a drone delivery network as a weighted graph,
//! searches it for energy-feasible paths with charging stops, and keeps
//! a self-balancing frequency index of the routes flown for analytics.
//! Higher-level consumers (CLI, dashboards) should only depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod index;
pub mod network;
pub mod path;
pub mod registry;
pub mod route;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, NodeId, NodeRole};
pub use index::FrequencyIndex;
pub use network::{load_network, parse_network};
pub use path::{find_path, find_path_with_limits, SearchLimits};
pub use registry::{RouteRecord, RouteRegistry, RouteStats};
pub use route::Route;
pub use routing::{plan_delivery, DeliveryPlan, DeliveryRequest, Leg};
