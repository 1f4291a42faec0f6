//! Loading a delivery network from its JSON description.
//!
//! The producer contract: every node id carries a role prefix (`S`
//! storage, `C` charging, `T` client), every edge weight is
//! non-negative, and connectivity is not guaranteed.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeRole};

#[derive(Debug, Deserialize)]
struct NetworkFile {
    nodes: Vec<String>,
    edges: Vec<(String, String, f64)>,
}

/// Read a network description from a file. See [`parse_network`].
pub fn load_network(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)?;
    parse_network(&text)
}

/// Parse a network description of the form
/// `{"nodes": ["S1", ...], "edges": [["S1", "C1", 9.0], ...]}`.
///
/// Node roles are derived from the id prefix; an unrecognized prefix
/// fails with [`Error::InvalidNodeId`], and edge validation follows
/// [`Graph::add_edge`].
pub fn parse_network(text: &str) -> Result<Graph> {
    let file: NetworkFile = serde_json::from_str(text)?;

    let mut graph = Graph::new();
    for id in file.nodes {
        let role = NodeRole::from_id(&id).ok_or_else(|| Error::InvalidNodeId { id: id.clone() })?;
        graph.add_vertex(id, role);
    }
    for (u, v, weight) in &file.edges {
        graph.add_edge(u, v, *weight)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded delivery network"
    );
    Ok(graph)
}
