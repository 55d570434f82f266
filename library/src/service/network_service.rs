use crate::error::LibraryError;
use crate::model::network::connection::{Connection, Endpoint};
use crate::model::network::network::Network;
use crate::sync::engine::SyncEngine;
use crate::sync::event::InputChangeEvent;
use crate::sync::layout::LayoutHint;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::handlers::sync_handler::SyncHandler;
use super::handlers::{read_network, write_network};

/// Host-facing entry point: owns the shared network document and the sync
/// engine, and routes input-change events to the right container.
pub struct NetworkService {
    network: Arc<RwLock<Network>>,
    engine: SyncEngine,
}

impl NetworkService {
    pub fn new(network: Arc<RwLock<Network>>) -> Self {
        Self {
            network,
            engine: SyncEngine::new(),
        }
    }

    pub fn with_layout(
        network: Arc<RwLock<Network>>,
        layout: Arc<dyn LayoutHint + Send + Sync>,
    ) -> Self {
        Self {
            network,
            engine: SyncEngine::with_layout(layout),
        }
    }

    /// Process one "positional input changed" event from the host.
    pub fn handle_input_change(&self, event: &InputChangeEvent) -> Result<(), LibraryError> {
        SyncHandler::handle_input_change(&self.network, &self.engine, event)
    }

    pub fn add_connection(
        &self,
        container_id: Uuid,
        from: Endpoint,
        to: Endpoint,
    ) -> Result<Connection, LibraryError> {
        SyncHandler::add_connection(&self.network, container_id, from, to)
    }

    pub fn remove_connection(
        &self,
        container_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), LibraryError> {
        SyncHandler::remove_connection(&self.network, container_id, connection_id)
    }

    /// Access the network immutably via a closure.
    /// Prefer this over handing out the lock.
    pub fn with_network<R>(&self, f: impl FnOnce(&Network) -> R) -> Result<R, LibraryError> {
        let guard = read_network(&self.network)?;
        Ok(f(&guard))
    }

    /// Access the network mutably via a closure.
    pub fn with_network_mut<R>(
        &self,
        f: impl FnOnce(&mut Network) -> R,
    ) -> Result<R, LibraryError> {
        let mut guard = write_network(&self.network)?;
        Ok(f(&mut guard))
    }
}
