//! Glint UI: immediate-mode panels and text on top of `glint-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use glint_ui::prelude::*;
//!
//! let mut ui = Group::new(&atlas, registry.solid_material());
//! let panel = Sprite::solid(registry.white_texture());
//!
//! // Each frame:
//! ui.clear();
//! ui.panel(&panel, Rect::new(10.0, 10.0, 210.0, 60.0));
//! ui.text("Score: 42", Rect::new(20.0, 20.0, 200.0, 50.0), Vec2::new(0.0, 0.5))?;
//! ui.tooltip(&panel, "points so far", Rect::new(10.0, 10.0, 210.0, 60.0), Vec2::new(0.5, 1.0), pointer)?;
//! let over_ui = ui.contains(pointer);
//! ui.draw(&mut surface);
//! ```
//!
//! Input is the application's concern: pass the pointer position in
//! world space to the calls that need it.

pub mod drawable;
pub mod group;

pub use drawable::{Drawable, Sprite};
pub use group::{Group, DEBUG_LAYER, DEBUG_LINE_WIDTH, PANEL_LAYER};

/// Everything needed to build UI frames.
pub mod prelude {
    pub use crate::drawable::{Drawable, Sprite};
    pub use crate::group::Group;

    pub use glint_engine::coords::{ColorRgba, Rect, Vec2};
    pub use glint_engine::render::{DrawList, RenderSurface};
}
