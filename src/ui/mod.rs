//! Terminal user interface.
//!
//! The application boundary: everything that actually touches the terminal
//! lives here. The controller core (catalog, loader, menu) only ever sees
//! the [`TerminalSurface`] through the `ViewSurface` trait.
//!
//! # Module structure
//!
//! - `loop_runner` - event loop and terminal lifecycle
//! - `input` - keyboard dispatch
//! - `render` - frame layout and widgets
//! - `surface` - the shared view state the loader writes and `render` reads

mod input;
mod loop_runner;
mod render;
mod surface;

pub use loop_runner::{run, Action};
pub use surface::{MenuItem, TerminalSurface};
