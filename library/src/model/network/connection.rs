//! Connection model for the combiner graph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a specific port on a specific node.
///
/// For sources the port is an output index (the Input boundary exposes one
/// output per positional input); for targets it is an input slot index.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node_id: Uuid,
    pub port: usize,
}

impl Endpoint {
    pub fn new(node_id: Uuid, port: usize) -> Self {
        Self { node_id, port }
    }
}

/// A directed edge between two ports (an edge in the combiner graph).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: Uuid,
    /// Source port (an output)
    pub from: Endpoint,
    /// Destination port (an input slot)
    pub to: Endpoint,
}

impl Connection {
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
        }
    }
}
