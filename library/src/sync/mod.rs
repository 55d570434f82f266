//! Incremental combiner-tree synchronization.
//!
//! The host fires one [`InputChangeEvent`] per positional-input flip; the
//! [`SyncEngine`] reads the container through the [`CombinerGraph`] read
//! model, decides via [`decision::decide`], and applies mutations through the
//! [`GraphMutator`].

pub mod decision;
pub mod engine;
pub mod event;
pub mod layout;
pub mod mutator;
pub mod view;

pub use decision::SyncAction;
pub use engine::SyncEngine;
pub use event::InputChangeEvent;
pub use layout::{LayoutHint, NullLayout};
pub use mutator::GraphMutator;
pub use view::{Apex, CombinerGraph, CombinerView};
