/// Cubemap environment shown behind the scene.
///
/// Faces are square, `face_size` texels on a side, stored face after face in
/// +X, -X, +Y, -Y, +Z, -Z order. Each texel is one packed RGBM word whose low
/// byte is red; the engine uploads the words as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyboxDesc {
    pub face_size: u32,
    pub texels: Vec<u32>,
    pub show_sun: bool,
}

impl SkyboxDesc {
    /// Builds a 2x2 per-face checker: the face color on the diagonal, a dim
    /// constant elsewhere.
    pub fn checker(face_colors: [u32; 6], dim: u32) -> Self {
        let texels = face_colors
            .iter()
            .flat_map(|&c| [c, dim, dim, c])
            .collect();

        Self {
            face_size: 2,
            texels,
            show_sun: true,
        }
    }

    /// Number of texels a well-formed description carries.
    pub fn expected_texels(&self) -> usize {
        (self.face_size as usize).pow(2) * 6
    }

    pub fn is_well_formed(&self) -> bool {
        self.face_size > 0 && self.texels.len() == self.expected_texels()
    }
}

impl Default for SkyboxDesc {
    fn default() -> Self {
        Self::checker(
            [
                0x2000_00FF,
                0x2000_FF00,
                0x20FF_0000,
                0x20FF_FF00,
                0x20FF_00FF,
                0x2000_FFFF,
            ],
            0x2000_0000,
        )
    }
}

/// Image-based ambient light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IndirectLightDesc {
    /// Illuminance in lux.
    pub intensity: f32,
}

impl Default for IndirectLightDesc {
    fn default() -> Self {
        Self { intensity: 3000.0 }
    }
}

/// A single-buffer vertex buffer of float3 positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexBufferDesc {
    pub vertex_count: u32,
}

impl VertexBufferDesc {
    pub const STRIDE: u64 = 3 * std::mem::size_of::<f32>() as u64;

    pub fn byte_len(&self) -> u64 {
        self.vertex_count as u64 * Self::STRIDE
    }
}

impl Default for VertexBufferDesc {
    fn default() -> Self {
        Self {
            vertex_count: 10_000,
        }
    }
}

/// Resources the engine builds into the scene once, at session creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDesc {
    pub skybox: SkyboxDesc,
    pub indirect_light: IndirectLightDesc,
    pub vertex_buffer: VertexBufferDesc,
}
