use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::combiner::CombinerData;

/// Marker node delimiting the container's external interface.
///
/// The Input boundary exposes one output per positional input of the
/// container; the Output boundary consumes a single edge on slot 0.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoundaryData {
    pub id: Uuid,
    pub name: String,
}

impl BoundaryData {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum Node {
    Input(BoundaryData),
    Output(BoundaryData),
    Combiner(CombinerData),
}

impl Node {
    /// Get the ID of this node
    pub fn id(&self) -> Uuid {
        match self {
            Node::Input(b) => b.id,
            Node::Output(b) => b.id,
            Node::Combiner(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Input(b) => &b.name,
            Node::Output(b) => &b.name,
            Node::Combiner(c) => &c.name,
        }
    }
}
