pub mod combiner;
pub mod connection;
pub mod container;
pub mod graph_analysis;
pub mod network;
pub mod node;

pub use combiner::{CombineOp, CombinerData};
pub use connection::{Connection, Endpoint};
pub use container::Container;
pub use network::Network;
pub use node::{BoundaryData, Node};
