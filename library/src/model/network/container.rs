use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::combiner::CombinerData;
use super::connection::{Connection, Endpoint};
use super::node::Node;

/// A container: an ordered, unbounded list of positional input slots, child
/// nodes (boundaries and combiners) in enumeration order, and the explicit
/// edge list among them.
///
/// Child enumeration order is the stored `nodes` order. It is stable for a
/// fixed child set and preserved by save/load; nothing more is promised.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Container {
    pub id: Uuid,
    pub name: String,
    /// Connection state of each positional input (index 0..N-1).
    #[serde(default)]
    pub inputs: Vec<bool>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Container {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            inputs: Vec::new(),
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Whether positional input `index` is currently connected.
    /// Indices beyond the stored list are reported as not connected.
    pub fn input_connected(&self, index: usize) -> bool {
        self.inputs.get(index).copied().unwrap_or(false)
    }

    /// Flip a positional input's connection state, growing the list as
    /// needed. This is the host-side state the sync engine reconciles with.
    pub fn set_input(&mut self, index: usize, connected: bool) {
        if index >= self.inputs.len() {
            self.inputs.resize(index + 1, false);
        }
        self.inputs[index] = connected;
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn get_node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn remove_node(&mut self, id: Uuid) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id() == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn get_combiner(&self, id: Uuid) -> Option<&CombinerData> {
        self.nodes.iter().find_map(|n| match n {
            Node::Combiner(c) if c.id == id => Some(c),
            _ => None,
        })
    }

    pub fn get_combiner_mut(&mut self, id: Uuid) -> Option<&mut CombinerData> {
        self.nodes.iter_mut().find_map(|n| match n {
            Node::Combiner(c) if c.id == id => Some(c),
            _ => None,
        })
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn remove_connection(&mut self, id: Uuid) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(index))
    }

    /// The connection terminating at a specific input slot, if any.
    /// Each input slot accepts at most one connection.
    pub fn connection_to(&self, target: Endpoint) -> Option<&Connection> {
        self.connections.iter().find(|c| c.to == target)
    }

    /// The connection originating at a specific output port, if any.
    pub fn connection_from(&self, source: Endpoint) -> Option<&Connection> {
        self.connections.iter().find(|c| c.from == source)
    }

    /// All connections terminating at any slot of `node_id`.
    pub fn connections_to_node(&self, node_id: Uuid) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.to.node_id == node_id)
    }

    /// All connections originating at any output of `node_id`.
    pub fn connections_from_node(&self, node_id: Uuid) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| c.from.node_id == node_id)
    }

    /// Remove every connection touching `node_id` on either side.
    pub fn remove_connections_for_node(&mut self, node_id: Uuid) {
        self.connections
            .retain(|c| c.from.node_id != node_id && c.to.node_id != node_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::combiner::{BACKGROUND, COMBINER_OUTPUT, CombineOp, FOREGROUND};
    use crate::model::network::node::BoundaryData;

    #[test]
    fn test_set_input_grows_list() {
        let mut container = Container::new("blend_stack");
        assert!(!container.input_connected(3));

        container.set_input(3, true);
        assert_eq!(container.inputs.len(), 4);
        assert!(container.input_connected(3));
        assert!(!container.input_connected(0));

        container.set_input(3, false);
        assert!(!container.input_connected(3));
    }

    #[test]
    fn test_remove_connections_for_node() {
        let mut container = Container::new("blend_stack");
        let input = BoundaryData::new("input");
        let input_id = input.id;
        let combiner = CombinerData::new("combine1", CombineOp::Add);
        let combiner_id = combiner.id;
        let output = BoundaryData::new("output");
        let output_id = output.id;

        container.add_node(Node::Input(input));
        container.add_node(Node::Combiner(combiner));
        container.add_node(Node::Output(output));

        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(combiner_id, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(input_id, 1),
            Endpoint::new(combiner_id, BACKGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(combiner_id, COMBINER_OUTPUT),
            Endpoint::new(output_id, 0),
        ));

        container.remove_connections_for_node(combiner_id);
        assert!(container.connections.is_empty());
    }

    #[test]
    fn test_connection_lookup_by_endpoint() {
        let mut container = Container::new("blend_stack");
        let input = BoundaryData::new("input");
        let input_id = input.id;
        let combiner = CombinerData::new("combine1", CombineOp::Add);
        let combiner_id = combiner.id;

        container.add_node(Node::Input(input));
        container.add_node(Node::Combiner(combiner));

        let conn = Connection::new(
            Endpoint::new(input_id, 2),
            Endpoint::new(combiner_id, FOREGROUND),
        );
        let conn_id = conn.id;
        container.add_connection(conn);

        assert_eq!(
            container
                .connection_from(Endpoint::new(input_id, 2))
                .map(|c| c.id),
            Some(conn_id)
        );
        assert_eq!(
            container
                .connection_to(Endpoint::new(combiner_id, FOREGROUND))
                .map(|c| c.id),
            Some(conn_id)
        );
        assert!(container.connection_from(Endpoint::new(input_id, 0)).is_none());
    }
}
