//! Demo driver: builds (or loads) a combiner container and replays a list of
//! input-change events against it.
//!
//! Usage:
//!   cli [network.json] +0 +1 +2 -1 ...
//!
//! `+i` connects positional input `i`, `-i` disconnects it. Without a JSON
//! path, a fresh container with a config template is used.

use library::LibraryError;
use library::model::network::combiner::{CONFIG_NODE_NAME, CombineOp, CombinerData};
use library::model::network::container::Container;
use library::model::network::graph_analysis::connected_leaf_indices;
use library::model::network::network::Network;
use library::model::network::node::{BoundaryData, Node};
use library::sync::engine::SyncEngine;
use library::sync::event::InputChangeEvent;

fn main() -> Result<(), LibraryError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut network = match args.first() {
        Some(path) if !path.starts_with(['+', '-']) => {
            let json = std::fs::read_to_string(path)?;
            Network::load(&json)?
        }
        _ => default_network(),
    };

    let container_id = network
        .containers
        .first()
        .map(|c| c.id)
        .ok_or_else(|| LibraryError::network("Network has no containers".to_string()))?;

    let engine = SyncEngine::new();

    for arg in args.iter().filter(|a| a.starts_with(['+', '-'])) {
        let connecting = arg.starts_with('+');
        let index: usize = arg[1..]
            .parse()
            .map_err(|_| LibraryError::network(format!("Bad event argument: {}", arg)))?;

        let container = network
            .get_container_mut(container_id)
            .ok_or_else(|| LibraryError::network("Container disappeared".to_string()))?;
        container.set_input(index, connecting);
        engine.handle_change(
            container,
            &InputChangeEvent::new(container_id, index, connecting),
        )?;
    }

    let container = network
        .get_container(container_id)
        .ok_or_else(|| LibraryError::network("Container disappeared".to_string()))?;
    print_container(container);

    Ok(())
}

fn default_network() -> Network {
    let mut container = Container::new("blend_stack");
    container.add_node(Node::Input(BoundaryData::new("input")));
    container.add_node(Node::Output(BoundaryData::new("output")));
    container.add_node(Node::Combiner(CombinerData::new(
        CONFIG_NODE_NAME,
        CombineOp::Blend,
    )));

    let mut network = Network::new("demo");
    network.add_container(container);
    network
}

fn print_container(container: &Container) {
    println!("container: {}", container.name);
    for node in &container.nodes {
        match node {
            Node::Input(b) => println!("  [input]    {}", b.name),
            Node::Output(b) => println!("  [output]   {}", b.name),
            Node::Combiner(c) => println!("  [combiner] {} (op={})", c.name, c.op),
        }
    }
    for conn in &container.connections {
        let from = container
            .get_node(conn.from.node_id)
            .map(|n| n.name().to_string())
            .unwrap_or_else(|| conn.from.node_id.to_string());
        let to = container
            .get_node(conn.to.node_id)
            .map(|n| n.name().to_string())
            .unwrap_or_else(|| conn.to.node_id.to_string());
        println!("  {}:{} -> {}:{}", from, conn.from.port, to, conn.to.port);
    }
    println!("leaves: {:?}", connected_leaf_indices(container));
}
