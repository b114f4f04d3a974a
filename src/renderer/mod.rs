//! Rendering module
//!
//! Drawing is backend-agnostic: the scene is emitted as calls on a
//! [`Canvas`], which a host maps onto its own 2D API.

pub mod canvas;
pub mod scene;

pub use canvas::{Canvas, DrawCommand, DrawList, TextAlign};
pub use scene::draw_frame;
