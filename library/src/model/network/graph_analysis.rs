//! Graph analysis utilities for the combiner graph.
//!
//! These functions let the sync engine and the host validate edits and derive
//! views from the edge list: reachability to the Output boundary and the set
//! of positional inputs the tree currently consumes.

use std::collections::{BTreeSet, HashSet, VecDeque};
use uuid::Uuid;

use super::combiner::{COMBINER_OUTPUT, DATA_SLOTS};
use super::connection::Connection;
use super::container::Container;
use super::node::Node;

/// Validate a connection before adding it.
///
/// Checks:
/// - Both nodes exist
/// - Port indices are in range for the endpoint node kinds
/// - No self-connections
/// - No duplicate connections to the same input slot
/// - No cycles
pub fn validate_connection(container: &Container, conn: &Connection) -> Result<(), String> {
    let source = container
        .get_node(conn.from.node_id)
        .ok_or_else(|| format!("Source node {} not found", conn.from.node_id))?;
    let target = container
        .get_node(conn.to.node_id)
        .ok_or_else(|| format!("Destination node {} not found", conn.to.node_id))?;

    match source {
        Node::Input(_) => {
            if conn.from.port >= container.inputs.len() {
                return Err(format!(
                    "Input boundary output {} out of range (container has {} positional inputs)",
                    conn.from.port,
                    container.inputs.len()
                ));
            }
        }
        Node::Combiner(_) => {
            if conn.from.port != COMBINER_OUTPUT {
                return Err(format!(
                    "Combiner output {} out of range",
                    conn.from.port
                ));
            }
        }
        Node::Output(_) => {
            return Err("Output boundary cannot be a connection source".to_string());
        }
    }

    match target {
        Node::Combiner(_) => {
            if conn.to.port >= DATA_SLOTS {
                return Err(format!(
                    "Combiner slot {} is not a data slot (parameter slots never take edges)",
                    conn.to.port
                ));
            }
        }
        Node::Output(_) => {
            if conn.to.port != 0 {
                return Err(format!("Output boundary slot {} out of range", conn.to.port));
            }
        }
        Node::Input(_) => {
            return Err("Input boundary cannot be a connection target".to_string());
        }
    }

    // No self-connections
    if conn.from.node_id == conn.to.node_id {
        return Err("Cannot connect a node to itself".to_string());
    }

    // No duplicate connections to same input slot (each slot accepts at most one)
    if container
        .connections
        .iter()
        .any(|c| c.to == conn.to && c.id != conn.id)
    {
        return Err(format!(
            "Input slot {}.{} already has a connection",
            conn.to.node_id, conn.to.port
        ));
    }

    // Check for cycles: would adding this connection create a cycle?
    if would_create_cycle(container, conn.from.node_id, conn.to.node_id) {
        return Err("Connection would create a cycle".to_string());
    }

    Ok(())
}

/// Check if connecting from_node → to_node would create a cycle.
/// Returns true if to_node can already reach from_node via existing connections.
fn would_create_cycle(container: &Container, from_node: Uuid, to_node: Uuid) -> bool {
    // BFS from to_node: if from_node is reachable, adding from→to creates a cycle.
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(to_node);

    while let Some(current) = queue.pop_front() {
        if current == from_node {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        for conn in &container.connections {
            if conn.from.node_id == current {
                queue.push_back(conn.to.node_id);
            }
        }
    }
    false
}

/// Whether `node_id` has a path to the Output boundary by following
/// outgoing edges. A node has at most one outgoing edge, so this is a walk.
pub fn reaches_output(container: &Container, node_id: Uuid) -> bool {
    let mut visited = HashSet::new();
    let mut current = node_id;

    loop {
        if !visited.insert(current) {
            // Cycle; never reaches the boundary.
            return false;
        }
        if matches!(container.get_node(current), Some(Node::Output(_))) {
            return true;
        }
        match container
            .connections
            .iter()
            .find(|c| c.from.node_id == current)
        {
            Some(conn) => current = conn.to.node_id,
            None => return false,
        }
    }
}

/// The set of positional-input indices reachable from the Output boundary —
/// the leaf set of the current combiner tree.
pub fn connected_leaf_indices(container: &Container) -> BTreeSet<usize> {
    let mut leaves = BTreeSet::new();
    let output_ids: Vec<Uuid> = container
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Output(b) => Some(b.id),
            _ => None,
        })
        .collect();

    let mut visited = HashSet::new();
    let mut queue: VecDeque<Uuid> = output_ids.into_iter().collect();

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        for conn in container.connections_to_node(current) {
            match container.get_node(conn.from.node_id) {
                Some(Node::Input(_)) => {
                    leaves.insert(conn.from.port);
                }
                Some(Node::Combiner(_)) => {
                    queue.push_back(conn.from.node_id);
                }
                _ => {}
            }
        }
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::combiner::{
        BACKGROUND, CombineOp, CombinerData, FOREGROUND,
    };
    use crate::model::network::connection::Endpoint;
    use crate::model::network::node::BoundaryData;

    fn setup_container() -> (Container, Uuid, Uuid) {
        let mut container = Container::new("blend_stack");
        let input = BoundaryData::new("input");
        let input_id = input.id;
        let output = BoundaryData::new("output");
        let output_id = output.id;
        container.add_node(Node::Input(input));
        container.add_node(Node::Output(output));
        container.inputs = vec![true; 4];
        (container, input_id, output_id)
    }

    fn add_combiner(container: &mut Container, name: &str) -> Uuid {
        let combiner = CombinerData::new(name, CombineOp::Add);
        let id = combiner.id;
        container.add_node(Node::Combiner(combiner));
        id
    }

    #[test]
    fn test_validate_connection_self_loop() {
        let (mut container, _, _) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");

        let conn = Connection::new(
            Endpoint::new(c1, COMBINER_OUTPUT),
            Endpoint::new(c1, FOREGROUND),
        );
        let result = validate_connection(&container, &conn);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("itself"));
    }

    #[test]
    fn test_validate_connection_rejects_parameter_slot() {
        let (mut container, input_id, _) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");

        // Slot 2 is the factor slot; it never takes a data edge.
        let conn = Connection::new(Endpoint::new(input_id, 0), Endpoint::new(c1, 2));
        let result = validate_connection(&container, &conn);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a data slot"));
    }

    #[test]
    fn test_validate_connection_rejects_occupied_slot() {
        let (mut container, input_id, _) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");

        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(c1, FOREGROUND),
        ));

        let conn = Connection::new(
            Endpoint::new(input_id, 1),
            Endpoint::new(c1, FOREGROUND),
        );
        let result = validate_connection(&container, &conn);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("already has a connection"));
    }

    #[test]
    fn test_cycle_detection() {
        let (mut container, _, _) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");
        let c2 = add_combiner(&mut container, "combine2");

        // c1 → c2
        container.add_connection(Connection::new(
            Endpoint::new(c1, COMBINER_OUTPUT),
            Endpoint::new(c2, FOREGROUND),
        ));

        // Try to add c2 → c1 (would create cycle)
        let cyclic_conn = Connection::new(
            Endpoint::new(c2, COMBINER_OUTPUT),
            Endpoint::new(c1, FOREGROUND),
        );
        let result = validate_connection(&container, &cyclic_conn);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cycle"));
    }

    #[test]
    fn test_reaches_output() {
        let (mut container, input_id, output_id) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");
        let c2 = add_combiner(&mut container, "combine2");

        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(c1, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(c1, COMBINER_OUTPUT),
            Endpoint::new(output_id, 0),
        ));

        assert!(reaches_output(&container, c1));
        // c2 has no outgoing edge: dangling.
        assert!(!reaches_output(&container, c2));
    }

    #[test]
    fn test_connected_leaf_indices() {
        let (mut container, input_id, output_id) = setup_container();
        let c1 = add_combiner(&mut container, "combine1");
        let c2 = add_combiner(&mut container, "combine2");

        // input[0] → c1.fg, input[1] → c1.bg, c1 → c2.fg, input[2] → c2.bg, c2 → output
        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(c1, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(input_id, 1),
            Endpoint::new(c1, BACKGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(c1, COMBINER_OUTPUT),
            Endpoint::new(c2, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(input_id, 2),
            Endpoint::new(c2, BACKGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(c2, COMBINER_OUTPUT),
            Endpoint::new(output_id, 0),
        ));

        let leaves = connected_leaf_indices(&container);
        assert_eq!(leaves, BTreeSet::from([0, 1, 2]));
    }
}
