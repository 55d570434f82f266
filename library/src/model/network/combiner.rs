//! Combiner node data: a binary merge node with two ordered data slots.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slot index of the foreground input.
pub const FOREGROUND: usize = 0;
/// Slot index of the background input.
pub const BACKGROUND: usize = 1;
/// Number of data slots on a combiner. Any further slot on the underlying
/// node type (e.g. the factor slot at index 2) is parameter-only and must
/// never receive a data edge.
pub const DATA_SLOTS: usize = 2;

/// Output index of a combiner's single output.
pub const COMBINER_OUTPUT: usize = 0;

/// Reserved name of the config template child. A combiner with this name is
/// a permanent parameter source: excluded from traversal, deletion, and
/// free-slot candidacy.
pub const CONFIG_NODE_NAME: &str = "config_combine";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CombineOp {
    #[default]
    Add,
    Blend,
    Crossfade,
    Multiply,
    Screen,
}

impl std::fmt::Display for CombineOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CombineOp::Add => "add",
            CombineOp::Blend => "blend",
            CombineOp::Crossfade => "crossfade",
            CombineOp::Multiply => "multiply",
            CombineOp::Screen => "screen",
        };
        write!(f, "{}", s)
    }
}

/// A combiner node: two ordered data input slots (`foreground`, `background`),
/// an operator parameter, and numeric parameters (factor, etc.).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CombinerData {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub op: CombineOp,
    #[serde(default)]
    pub params: Vec<OrderedFloat<f64>>,
}

impl CombinerData {
    pub fn new(name: &str, op: CombineOp) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            op,
            params: Vec::new(),
        }
    }

    /// Deep-copy operator and parameters from a template, minting a fresh
    /// identity. Never copies the template's id or name.
    pub fn from_template(name: &str, template: &CombinerData) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            op: template.op,
            params: template.params.clone(),
        }
    }

    pub fn is_config_template(&self) -> bool {
        self.name == CONFIG_NODE_NAME
    }
}
