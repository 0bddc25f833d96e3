//! Reference shader pairs.

pub mod color;
pub mod texture;

pub use color::{ColorPixelShader, ColorVertexShader};
pub use texture::{TexturePixelShader, TextureUniforms, TextureVertexShader};
