//! Pure decision step of the sync pipeline, separated from mutation so it
//! can be tested against a read model alone.

use uuid::Uuid;

use super::view::{Apex, CombinerGraph};

/// What the engine should do for one input-change event, decided against a
/// canonical (post-cleanup, post-repair) graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncAction {
    /// Disconnection: the stale edge clear plus cleanup/repair already
    /// restored the tree; nothing further to build.
    Remove,
    /// Reuse the free slot of an existing combiner.
    ReuseSlot { combiner: Uuid, slot: usize },
    /// Every combiner is full: grow the tree above the current apex.
    GrowTree { apex: Apex },
    /// The tree is empty: materialize the first combiner.
    StartTree,
}

/// Decide the action for a (canonical) graph and the resolved connection
/// state of the changed input.
pub fn decide(graph: &CombinerGraph, connecting: bool) -> SyncAction {
    if !connecting {
        return SyncAction::Remove;
    }

    if let Some(view) = graph.first_with_free_slot() {
        return SyncAction::ReuseSlot {
            combiner: view.id,
            slot: view.free_data_slot(),
        };
    }

    match graph.apex() {
        Some(apex) => SyncAction::GrowTree { apex },
        None => SyncAction::StartTree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::combiner::{
        BACKGROUND, COMBINER_OUTPUT, CombineOp, CombinerData, FOREGROUND,
    };
    use crate::model::network::connection::{Connection, Endpoint};
    use crate::model::network::container::Container;
    use crate::model::network::node::{BoundaryData, Node};

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

    #[test]
    fn test_decide_remove() {
        let (container, _, _) = setup_container();
        let graph = CombinerGraph::scan(&container).unwrap();
        assert_eq!(decide(&graph, false), SyncAction::Remove);
    }

    #[test]
    fn test_decide_start_tree_when_empty() {
        let (container, _, _) = setup_container();
        let graph = CombinerGraph::scan(&container).unwrap();
        assert_eq!(decide(&graph, true), SyncAction::StartTree);
    }

    #[test]
    fn test_decide_prefers_free_slot_over_growth() {
        let (mut container, input_id, output_id) = setup_container();
        let c1 = CombinerData::new("combine1", CombineOp::Add);
        let c1_id = c1.id;
        container.add_node(Node::Combiner(c1));

        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(c1_id, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(c1_id, COMBINER_OUTPUT),
            Endpoint::new(output_id, 0),
        ));

        let graph = CombinerGraph::scan(&container).unwrap();
        assert_eq!(
            decide(&graph, true),
            SyncAction::ReuseSlot {
                combiner: c1_id,
                slot: BACKGROUND
            }
        );
    }

    #[test]
    fn test_decide_grows_above_full_apex() {
        let (mut container, input_id, output_id) = setup_container();
        let c1 = CombinerData::new("combine1", CombineOp::Add);
        let c1_id = c1.id;
        container.add_node(Node::Combiner(c1));

        container.add_connection(Connection::new(
            Endpoint::new(input_id, 0),
            Endpoint::new(c1_id, FOREGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(input_id, 1),
            Endpoint::new(c1_id, BACKGROUND),
        ));
        container.add_connection(Connection::new(
            Endpoint::new(c1_id, COMBINER_OUTPUT),
            Endpoint::new(output_id, 0),
        ));

        let graph = CombinerGraph::scan(&container).unwrap();
        assert_eq!(
            decide(&graph, true),
            SyncAction::GrowTree {
                apex: Apex::Combiner(c1_id)
            }
        );
    }
}
