//! XML interchange for world files.
//!
//! The reader turns an input document into a validated [`World`](life_core::World) and its
//! initial [`Grid`](life_world::Grid); the writer fills the output template with a final grid.
//! Both sides share the element names defined in [`document`].

pub mod document;
pub mod reader;
pub mod writer;

pub use reader::{load_world, parse_world};
pub use writer::{render_world, save_world};
