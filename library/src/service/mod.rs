//! Host-facing services - public API for authoring-tool integration.

pub mod handlers;
pub mod network_service;

// Re-exports for convenient access
pub use network_service::NetworkService;
