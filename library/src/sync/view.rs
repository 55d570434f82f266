//! Read model over a container's children, rebuilt on every event.

use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::network::combiner::{BACKGROUND, COMBINER_OUTPUT, DATA_SLOTS, FOREGROUND};
use crate::model::network::container::Container;
use crate::model::network::node::Node;

/// Per-combiner classification derived from the edge list.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinerView {
    pub id: Uuid,
    /// Occupied data slots, ascending. Subset of {0, 1}.
    pub occupied: Vec<usize>,
    /// Whether this combiner's outgoing edge targets the Output boundary
    /// directly (not transitively).
    pub feeds_output: bool,
}

impl CombinerView {
    /// The data slot an insert should target: foreground if it is free,
    /// otherwise background.
    pub fn free_data_slot(&self) -> usize {
        if self.occupied.contains(&FOREGROUND) {
            BACKGROUND
        } else {
            FOREGROUND
        }
    }
}

/// The node currently feeding the Output boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Apex {
    Combiner(Uuid),
    /// A direct Input→Output edge (empty/singleton case authored elsewhere;
    /// the engine itself always materializes a combiner).
    InputBoundary,
}

/// Classification of a container's children: the two boundaries, the optional
/// config template, and every combiner with its slot/output tags.
///
/// Combiners appear in the container's child enumeration order.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinerGraph {
    pub input_id: Uuid,
    pub output_id: Uuid,
    pub template_id: Option<Uuid>,
    pub combiners: Vec<CombinerView>,
    input_feeds_output: bool,
}

impl CombinerGraph {
    /// Scan a container's children. Fails with a `Configuration` error if the
    /// Input or Output boundary is absent or duplicated; performs no writes.
    ///
    /// Malformed edges (out-of-range port, unknown endpoint) are logged and
    /// skipped so one bad edge never blocks the rest of the scan.
    pub fn scan(container: &Container) -> Result<Self, LibraryError> {
        let mut input_id = None;
        let mut output_id = None;
        let mut template_id = None;
        let mut combiner_ids = Vec::new();

        for node in &container.nodes {
            match node {
                Node::Input(b) => {
                    if input_id.replace(b.id).is_some() {
                        return Err(LibraryError::configuration(format!(
                            "Container {} has more than one Input boundary",
                            container.name
                        )));
                    }
                }
                Node::Output(b) => {
                    if output_id.replace(b.id).is_some() {
                        return Err(LibraryError::configuration(format!(
                            "Container {} has more than one Output boundary",
                            container.name
                        )));
                    }
                }
                Node::Combiner(c) => {
                    if c.is_config_template() {
                        if template_id.is_some() {
                            log::warn!(
                                "Container {} has more than one config template; using the first",
                                container.name
                            );
                        } else {
                            template_id = Some(c.id);
                        }
                        continue;
                    }
                    combiner_ids.push(c.id);
                }
            }
        }

        let input_id = input_id.ok_or_else(|| {
            LibraryError::configuration(format!(
                "Container {} has no Input boundary",
                container.name
            ))
        })?;
        let output_id = output_id.ok_or_else(|| {
            LibraryError::configuration(format!(
                "Container {} has no Output boundary",
                container.name
            ))
        })?;

        let mut combiners = Vec::with_capacity(combiner_ids.len());
        for id in combiner_ids {
            let mut occupied = Vec::new();
            for conn in container.connections_to_node(id) {
                if conn.to.port >= DATA_SLOTS {
                    log::warn!(
                        "Skipping edge {} into non-data slot {} of combiner {}",
                        conn.id,
                        conn.to.port,
                        id
                    );
                    continue;
                }
                if container.get_node(conn.from.node_id).is_none() {
                    log::warn!(
                        "Skipping edge {} from unknown node {}",
                        conn.id,
                        conn.from.node_id
                    );
                    continue;
                }
                if !occupied.contains(&conn.to.port) {
                    occupied.push(conn.to.port);
                }
            }
            occupied.sort_unstable();

            let feeds_output = container
                .connections_from_node(id)
                .any(|c| c.from.port == COMBINER_OUTPUT && c.to.node_id == output_id);

            combiners.push(CombinerView {
                id,
                occupied,
                feeds_output,
            });
        }

        let input_feeds_output = container
            .connections_from_node(input_id)
            .any(|c| c.to.node_id == output_id);

        Ok(Self {
            input_id,
            output_id,
            template_id,
            combiners,
            input_feeds_output,
        })
    }

    /// First combiner (in child enumeration order) with exactly one free data
    /// slot. The config template is never a candidate.
    pub fn first_with_free_slot(&self) -> Option<&CombinerView> {
        self.combiners.iter().find(|c| c.occupied.len() == 1)
    }

    /// The node whose output currently feeds the Output boundary, if any.
    pub fn apex(&self) -> Option<Apex> {
        if let Some(view) = self.combiners.iter().find(|c| c.feeds_output) {
            return Some(Apex::Combiner(view.id));
        }
        if self.combiners.is_empty() && self.input_feeds_output {
            return Some(Apex::InputBoundary);
        }
        None
    }
}
