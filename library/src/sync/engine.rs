//! The sync engine: keeps a container's combiner tree consistent with its
//! positional-input connection states, one change event at a time.
//!
//! Pipeline for every event, in order: validate boundaries (no writes yet),
//! evaluate connectivity, clear the changed input's stale edge, cleanup
//! (cascade-delete empty combiners), repair (single occupied slot must be
//! foreground), then the insert decision on a re-scanned graph.

use std::sync::Arc;

use crate::error::LibraryError;
use crate::model::network::combiner::{BACKGROUND, COMBINER_OUTPUT, FOREGROUND};
use crate::model::network::connection::Endpoint;
use crate::model::network::container::Container;
use crate::model::network::graph_analysis;
use crate::model::network::node::Node;

use super::decision::{SyncAction, decide};
use super::event::InputChangeEvent;
use super::layout::LayoutHint;
use super::mutator::GraphMutator;
use super::view::CombinerGraph;

#[derive(Default)]
pub struct SyncEngine {
    layout: Option<Arc<dyn LayoutHint + Send + Sync>>,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self { layout: None }
    }

    pub fn with_layout(layout: Arc<dyn LayoutHint + Send + Sync>) -> Self {
        Self {
            layout: Some(layout),
        }
    }

    /// Process one positional-input change. Runs to completion or fails;
    /// boundary validation happens strictly before any write, so a
    /// `Configuration` error leaves the container untouched.
    pub fn handle_change(
        &self,
        container: &mut Container,
        event: &InputChangeEvent,
    ) -> Result<(), LibraryError> {
        let graph = CombinerGraph::scan(container)?;
        let input_id = graph.input_id;
        let output_id = graph.output_id;

        // The container's own input state is authoritative; the host flips it
        // before delivering the event.
        let connecting = container.input_connected(event.index);
        if connecting != event.connecting {
            log::warn!(
                "Event for input {} of {} says connecting={}, container says {}; container wins",
                event.index,
                container.name,
                event.connecting,
                connecting
            );
        }

        let stale = container
            .connection_from(Endpoint::new(input_id, event.index))
            .is_some();
        if connecting && stale {
            log::debug!(
                "Input {} of {} is already synchronized",
                event.index,
                container.name
            );
            return Ok(());
        }

        let template = graph
            .template_id
            .and_then(|id| container.get_combiner(id).cloned());

        if stale {
            let mut mutator = GraphMutator::new(container);
            mutator.clear_source(input_id, event.index);
        }

        Self::cleanup(container)?;
        Self::repair(container)?;

        if connecting {
            // Cleanup/repair may have restructured the tree; decide on a
            // fresh scan.
            let graph = CombinerGraph::scan(container)?;
            match decide(&graph, true) {
                SyncAction::ReuseSlot { combiner, slot } => {
                    let mut mutator = GraphMutator::new(container);
                    mutator.connect(input_id, event.index, combiner, slot)?;
                }
                SyncAction::GrowTree { .. } => {
                    let prior = container
                        .connection_to(Endpoint::new(output_id, 0))
                        .cloned()
                        .ok_or_else(|| {
                            LibraryError::invariant(
                                "Apex reported but no edge feeds the Output boundary",
                            )
                        })?;
                    let mut mutator = GraphMutator::new(container);
                    mutator.disconnect(output_id, 0);
                    let new_id = mutator.create_combiner(template.as_ref());
                    mutator.connect(prior.from.node_id, prior.from.port, new_id, FOREGROUND)?;
                    mutator.connect(input_id, event.index, new_id, BACKGROUND)?;
                    mutator.connect(new_id, COMBINER_OUTPUT, output_id, 0)?;
                }
                SyncAction::StartTree => {
                    let mut mutator = GraphMutator::new(container);
                    let new_id = mutator.create_combiner(template.as_ref());
                    mutator.connect(input_id, event.index, new_id, FOREGROUND)?;
                    mutator.connect(new_id, COMBINER_OUTPUT, output_id, 0)?;
                }
                // decide() only returns Remove for disconnections.
                SyncAction::Remove => {}
            }
        }

        Self::audit(container)?;

        if let Some(layout) = &self.layout {
            layout.container_changed(container.id);
        }

        Ok(())
    }

    /// Destroy every non-template combiner with zero occupied data slots,
    /// iterating to a fixed point: a destruction removes the node's outgoing
    /// edge too, which can empty its former parent.
    fn cleanup(container: &mut Container) -> Result<(), LibraryError> {
        loop {
            let graph = CombinerGraph::scan(container)?;
            let empty: Vec<_> = graph
                .combiners
                .iter()
                .filter(|c| c.occupied.is_empty())
                .map(|c| c.id)
                .collect();
            if empty.is_empty() {
                return Ok(());
            }
            let mut mutator = GraphMutator::new(container);
            for id in empty {
                mutator.destroy_combiner(id)?;
            }
        }
    }

    /// Restore canonical form: a combiner whose only occupied data slot is
    /// `background` has that edge moved to `foreground`. Insert's free-slot
    /// search depends on this.
    fn repair(container: &mut Container) -> Result<(), LibraryError> {
        let graph = CombinerGraph::scan(container)?;
        let to_fix: Vec<_> = graph
            .combiners
            .iter()
            .filter(|c| c.occupied == [BACKGROUND])
            .map(|c| c.id)
            .collect();

        for id in to_fix {
            let source = container
                .connection_to(Endpoint::new(id, BACKGROUND))
                .map(|c| c.from);
            if let Some(source) = source {
                let mut mutator = GraphMutator::new(container);
                mutator.disconnect(id, BACKGROUND);
                mutator.connect(source.node_id, source.port, id, FOREGROUND)?;
            }
        }
        Ok(())
    }

    /// Post-settle structural audit. A combiner with no path to the Output
    /// boundary should be unreachable if the algorithm is correct; fail fast
    /// rather than attempt automatic repair.
    fn audit(container: &Container) -> Result<(), LibraryError> {
        for node in &container.nodes {
            if let Node::Combiner(c) = node {
                if c.is_config_template() {
                    continue;
                }
                if !graph_analysis::reaches_output(container, c.id) {
                    return Err(LibraryError::invariant(format!(
                        "Combiner {} has no path to the Output boundary",
                        c.name
                    )));
                }
            }
        }
        Ok(())
    }
}
