// Library crate: exposes testable modules for integration tests and the scripting interface.
// Window chrome (app, ui, viewport input and painting) stays in the binary crate.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod interaction;
pub mod physics;
pub mod render;
pub mod state;

/// Camera and trail buffers. The egui viewport panel stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod trails;
}
