pub mod error;
pub mod lighttracking;
pub mod model;
pub mod service;
pub mod sync;

pub use error::LibraryError;
