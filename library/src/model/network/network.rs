use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::container::Container;

/// Top-level document: a named set of independent containers.
///
/// Containers own disjoint subgraphs, so they can be processed concurrently
/// with no shared mutable state beyond the document lock.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Network {
    pub name: String,
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Network {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            containers: Vec::new(),
        }
    }

    pub fn load(json_str: &str) -> Result<Self, serde_json::Error> {
        let network: Network = serde_json::from_str(json_str)?;

        Ok(network)
    }

    pub fn save(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn add_container(&mut self, container: Container) {
        self.containers.push(container);
    }

    pub fn get_container(&self, id: Uuid) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn get_container_mut(&mut self, id: Uuid) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    pub fn remove_container(&mut self, id: Uuid) -> Option<Container> {
        let index = self.containers.iter().position(|c| c.id == id)?;
        Some(self.containers.remove(index))
    }
}
