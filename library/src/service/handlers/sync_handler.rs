use crate::error::LibraryError;
use crate::model::network::connection::{Connection, Endpoint};
use crate::model::network::network::Network;
use crate::sync::engine::SyncEngine;
use crate::sync::event::InputChangeEvent;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub struct SyncHandler;

impl SyncHandler {
    /// Resolve the event's container and run the engine under the write lock.
    pub fn handle_input_change(
        network: &Arc<RwLock<Network>>,
        engine: &SyncEngine,
        event: &InputChangeEvent,
    ) -> Result<(), LibraryError> {
        let mut net = super::write_network(network)?;

        let container = net.get_container_mut(event.container_id).ok_or_else(|| {
            LibraryError::network(format!("Container {} not found", event.container_id))
        })?;

        engine.handle_change(container, event)
    }

    /// Add a manual connection between two ports (with validation).
    pub fn add_connection(
        network: &Arc<RwLock<Network>>,
        container_id: Uuid,
        from: Endpoint,
        to: Endpoint,
    ) -> Result<Connection, LibraryError> {
        let mut net = super::write_network(network)?;

        let container = net
            .get_container_mut(container_id)
            .ok_or_else(|| LibraryError::network(format!("Container {} not found", container_id)))?;

        let conn = Connection::new(from, to);

        crate::model::network::graph_analysis::validate_connection(container, &conn)
            .map_err(LibraryError::connection)?;

        container.add_connection(conn.clone());

        Ok(conn)
    }

    /// Remove a connection by ID.
    pub fn remove_connection(
        network: &Arc<RwLock<Network>>,
        container_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), LibraryError> {
        let mut net = super::write_network(network)?;

        let container = net
            .get_container_mut(container_id)
            .ok_or_else(|| LibraryError::network(format!("Container {} not found", container_id)))?;

        if container.remove_connection(connection_id).is_none() {
            return Err(LibraryError::network(format!(
                "Connection {} not found",
                connection_id
            )));
        }

        Ok(())
    }
}
