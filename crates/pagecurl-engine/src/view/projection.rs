/// Axis the field of view angle is measured along.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum FovAxis {
    /// The angle spans the viewport width.
    #[default]
    Horizontal,
    /// The angle spans the viewport height.
    Vertical,
}

/// Perspective projection parameters for a camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fov_degrees: f64,
    pub axis: FovAxis,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub const fn perspective(fov_degrees: f64, aspect: f64, near: f64, far: f64, axis: FovAxis) -> Self {
        Self {
            fov_degrees,
            axis,
            aspect,
            near,
            far,
        }
    }

    /// Half width and half height of the frustum at the near plane.
    pub fn near_half_extents(&self) -> (f64, f64) {
        let half = self.near * (self.fov_degrees.to_radians() * 0.5).tan();
        match self.axis {
            FovAxis::Horizontal => (half, half / self.aspect),
            FovAxis::Vertical => (half * self.aspect, half),
        }
    }

    /// Field of view along the vertical axis, in degrees.
    pub fn vertical_fov_degrees(&self) -> f64 {
        let (_, half_h) = self.near_half_extents();
        2.0 * (half_h / self.near).atan().to_degrees()
    }

    /// Field of view along the horizontal axis, in degrees.
    pub fn horizontal_fov_degrees(&self) -> f64 {
        let (half_w, _) = self.near_half_extents();
        2.0 * (half_w / self.near).atan().to_degrees()
    }

    /// Column-major clip-space matrix with a `[0, 1]` depth range.
    pub fn matrix(&self) -> [[f32; 4]; 4] {
        let (half_w, half_h) = self.near_half_extents();
        let n = self.near;
        let f = self.far;

        let sx = n / half_w;
        let sy = n / half_h;
        let a = f / (n - f);
        let b = n * f / (n - f);

        [
            [sx as f32, 0.0, 0.0, 0.0],
            [0.0, sy as f32, 0.0, 0.0],
            [0.0, 0.0, a as f32, -1.0],
            [0.0, 0.0, b as f32, 0.0],
        ]
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(90.0, 1.0, 0.1, 1000.0, FovAxis::Horizontal)
    }
}
