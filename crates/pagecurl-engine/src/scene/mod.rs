//! Scene configuration handed to the engine.
//!
//! These are plain configuration structs; the engine decides how to realize
//! them (textures, buffers, lights).

mod desc;
mod material;

pub use desc::{IndirectLightDesc, SceneDesc, SkyboxDesc, VertexBufferDesc};
pub use material::{MaterialInfo, MaterialParameter};
