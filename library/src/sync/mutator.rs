//! Primitive mutations on a container's combiner graph.
//!
//! Every operation is synchronous and immediately observable; there is no
//! staged or transactional batching.

use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::network::combiner::{COMBINER_OUTPUT, CombineOp, CombinerData, DATA_SLOTS};
use crate::model::network::connection::{Connection, Endpoint};
use crate::model::network::container::Container;
use crate::model::network::node::Node;

pub struct GraphMutator<'a> {
    container: &'a mut Container,
}

impl<'a> GraphMutator<'a> {
    pub fn new(container: &'a mut Container) -> Self {
        Self { container }
    }

    /// Create a combiner child. With a template, its operator and numeric
    /// parameters are deep-copied (never its identity); without one, the
    /// operator defaults to `add`.
    pub fn create_combiner(&mut self, template: Option<&CombinerData>) -> Uuid {
        let name = self.next_combiner_name();
        let combiner = match template {
            Some(template) => CombinerData::from_template(&name, template),
            None => CombinerData::new(&name, CombineOp::Add),
        };
        let id = combiner.id;
        self.container.add_node(Node::Combiner(combiner));
        log::debug!("Created combiner {} ({})", name, id);
        id
    }

    /// Destroy a combiner and every edge touching it, on either side.
    /// The config template is permanent and cannot be destroyed.
    pub fn destroy_combiner(&mut self, id: Uuid) -> Result<(), LibraryError> {
        let combiner = self
            .container
            .get_combiner(id)
            .ok_or_else(|| LibraryError::network(format!("Combiner {} not found", id)))?;
        if combiner.is_config_template() {
            return Err(LibraryError::network(
                "The config template cannot be destroyed".to_string(),
            ));
        }

        self.container.remove_connections_for_node(id);
        self.container.remove_node(id);
        log::debug!("Destroyed combiner {}", id);
        Ok(())
    }

    /// Connect a source output to a target input slot.
    ///
    /// Endpoint kinds and ranges are checked up front; the target slot must
    /// be free. Data edges never target a combiner's parameter slots.
    pub fn connect(
        &mut self,
        source_id: Uuid,
        source_output: usize,
        target_id: Uuid,
        target_slot: usize,
    ) -> Result<(), LibraryError> {
        let source = Endpoint::new(source_id, source_output);
        let target = Endpoint::new(target_id, target_slot);

        match self.container.get_node(source_id) {
            Some(Node::Output(_)) | None => {
                return Err(LibraryError::connection(format!(
                    "Invalid connection source {}",
                    source_id
                )));
            }
            Some(Node::Combiner(_)) if source_output != COMBINER_OUTPUT => {
                return Err(LibraryError::connection(format!(
                    "Combiner output {} out of range",
                    source_output
                )));
            }
            Some(Node::Input(_)) if source_output >= self.container.inputs.len() => {
                return Err(LibraryError::connection(format!(
                    "Input boundary output {} out of range (container has {} positional inputs)",
                    source_output,
                    self.container.inputs.len()
                )));
            }
            _ => {}
        }

        match self.container.get_node(target_id) {
            Some(Node::Input(_)) | None => {
                return Err(LibraryError::connection(format!(
                    "Invalid connection target {}",
                    target_id
                )));
            }
            Some(Node::Combiner(_)) if target_slot >= DATA_SLOTS => {
                return Err(LibraryError::connection(format!(
                    "Combiner slot {} is not a data slot",
                    target_slot
                )));
            }
            Some(Node::Output(_)) if target_slot != 0 => {
                return Err(LibraryError::connection(format!(
                    "Output boundary slot {} out of range",
                    target_slot
                )));
            }
            _ => {}
        }

        if self.container.connection_to(target).is_some() {
            return Err(LibraryError::connection(format!(
                "Input slot {}.{} already has a connection",
                target_id, target_slot
            )));
        }

        self.container.add_connection(Connection::new(source, target));
        Ok(())
    }

    /// Clear the edge terminating at a target slot, if one exists.
    pub fn disconnect(&mut self, target_id: Uuid, target_slot: usize) -> bool {
        let target = Endpoint::new(target_id, target_slot);
        match self.container.connection_to(target).map(|c| c.id) {
            Some(id) => {
                self.container.remove_connection(id);
                true
            }
            None => false,
        }
    }

    /// Clear the edge originating at a source output, if one exists.
    /// Returns the removed connection.
    pub fn clear_source(&mut self, source_id: Uuid, source_output: usize) -> Option<Connection> {
        let source = Endpoint::new(source_id, source_output);
        let id = self.container.connection_from(source).map(|c| c.id)?;
        self.container.remove_connection(id)
    }

    fn next_combiner_name(&self) -> String {
        let count = self
            .container
            .nodes
            .iter()
            .filter(|n| matches!(n, Node::Combiner(_)))
            .count();
        let mut index = count + 1;
        let mut name = format!("combine{}", index);
        while self.container.nodes.iter().any(|n| n.name() == name) {
            index += 1;
            name = format!("combine{}", index);
        }
        name
    }
}
