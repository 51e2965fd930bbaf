//! Glint engine crate.
//!
//! CPU-side geometry and text layout producing renderer-agnostic meshes:
//! - [`geom`] strokes and fills 2D shapes
//! - [`text`] bakes glyph atlases and lays out strings against them
//! - [`render`] defines the surface/material contracts meshes are drawn through
//!
//! Window, input and pipeline management belong to the embedding application.

pub mod coords;
pub mod error;
pub mod geom;
pub mod image;
pub mod logging;
pub mod render;
pub mod resources;
pub mod text;

pub use error::{Error, Result};
