use thiserror::Error;

/// Convenient result alias for the skyroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier is not part of the network.
    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    /// Raised when an edge is added with a negative weight.
    #[error("edge {u} - {v} has negative weight {weight}")]
    InvalidEdgeWeight { u: String, v: String, weight: f64 },

    /// Raised when no energy-feasible path exists under the given capacity.
    #[error("no viable path from {origin} to {destination} with capacity {capacity}")]
    NoViablePath {
        origin: String,
        destination: String,
        capacity: f64,
    },

    /// Raised when a route references consecutive nodes with no connecting edge.
    #[error("route is not traversable: no edge between {from} and {to}")]
    DisconnectedRoute { from: String, to: String },

    /// Raised when the path search exceeds its state-expansion budget.
    #[error("search budget exhausted after {expansions} state expansions")]
    SearchBudgetExhausted { expansions: usize },

    /// Raised when a delivery is requested with a non-positive capacity.
    #[error("capacity must be positive, got {capacity}")]
    InvalidCapacity { capacity: f64 },

    /// Raised when a node identifier does not carry a recognized role prefix.
    #[error("node id {id} does not start with a role prefix (S, C, or T)")]
    InvalidNodeId { id: String },

    /// Raised when constructing a route from fewer than two nodes.
    #[error("route requires at least two nodes")]
    EmptyRoute,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
