use std::collections::HashMap;

use crate::error::{Error, Result};

/// Identifier for a network node. The first character encodes the node's
/// role by generator convention (`S` storage, `C` charging, `T` client).
pub type NodeId = String;

/// Role a node plays in the delivery network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Storage,
    Charging,
    Client,
}

impl NodeRole {
    /// Derive the role from an identifier's prefix character.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.chars().next()? {
            'S' => Some(NodeRole::Storage),
            'C' => Some(NodeRole::Charging),
            'T' => Some(NodeRole::Client),
            _ => None,
        }
    }
}

/// Adjacency entry within the network graph.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Weighted undirected network of storage, charging, and client nodes.
///
/// Built once by a network producer and treated as read-only by the
/// path search afterwards. Edge lookup is symmetric: both argument
/// orders resolve to the same edge.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    roles: HashMap<NodeId, NodeRole>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with the given role. Re-adding an existing node
    /// updates its role and keeps its edges.
    pub fn add_vertex(&mut self, id: impl Into<NodeId>, role: NodeRole) {
        let id = id.into();
        self.adjacency.entry(id.clone()).or_default();
        self.roles.insert(id, role);
    }

    /// Connect two existing nodes with a non-negative weight. The edge is
    /// stored in both adjacency lists; adding the same pair again
    /// replaces the weight.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<()> {
        if weight < 0.0 {
            return Err(Error::InvalidEdgeWeight {
                u: u.to_string(),
                v: v.to_string(),
                weight,
            });
        }
        if !self.roles.contains_key(u) {
            return Err(Error::UnknownNode { id: u.to_string() });
        }
        if !self.roles.contains_key(v) {
            return Err(Error::UnknownNode { id: v.to_string() });
        }

        Self::link(self.adjacency.entry(u.to_string()).or_default(), v, weight);
        if u != v {
            Self::link(self.adjacency.entry(v.to_string()).or_default(), u, weight);
        }
        Ok(())
    }

    fn link(edges: &mut Vec<Edge>, target: &str, weight: f64) {
        if let Some(existing) = edges.iter_mut().find(|edge| edge.target == target) {
            existing.weight = weight;
        } else {
            edges.push(Edge {
                target: target.to_string(),
                weight,
            });
        }
    }

    /// Weight of the edge between `u` and `v`, regardless of argument order.
    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        self.adjacency
            .get(u)?
            .iter()
            .find(|edge| edge.target == v)
            .map(|edge| edge.weight)
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }

    pub fn role(&self, id: &str) -> Option<NodeRole> {
        self.roles.get(id).copied()
    }

    /// Whether arriving at this node restores a drone's full autonomy.
    pub fn is_charging(&self, id: &str) -> bool {
        self.role(id) == Some(NodeRole::Charging)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &NodeId> {
        self.roles.keys()
    }

    /// Enumerate each undirected edge exactly once as `(u, v, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, f64)> {
        self.adjacency.iter().flat_map(|(source, edges)| {
            edges
                .iter()
                .filter(move |edge| *source <= edge.target)
                .map(move |edge| (source, &edge.target, edge.weight))
        })
    }

    pub fn node_count(&self) -> usize {
        self.roles.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
