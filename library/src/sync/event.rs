use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A "positional input changed" notification from the host.
///
/// The host delivers one event at a time per container, after it has already
/// flipped the input's connection state on the container. The container state
/// is authoritative; `connecting` is carried for decision-level tests and is
/// cross-checked against it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputChangeEvent {
    pub container_id: Uuid,
    pub index: usize,
    pub connecting: bool,
}

impl InputChangeEvent {
    pub fn new(container_id: Uuid, index: usize, connecting: bool) -> Self {
        Self {
            container_id,
            index,
            connecting,
        }
    }
}
