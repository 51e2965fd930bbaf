//! Render-side contracts.
//!
//! Geometry and text produce [`Mesh`](crate::geom::Mesh)es; everything here
//! describes how those meshes are handed to a backend:
//! - [`RenderSurface`] is the sink trait, [`DrawList`] a recording implementation
//! - [`Material`] names the shader and textures a mesh is drawn with
//! - [`GpuTexture`] uploads an [`Image`](crate::image::Image) to wgpu

mod draw_list;
mod gpu_texture;
mod surface;

pub use draw_list::{DrawItem, DrawList, ZIndex};
pub use gpu_texture::GpuTexture;
pub use surface::{Material, RenderSurface, ShaderId, TextureId};
