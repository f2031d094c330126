use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Fixed logical-resolution projection: (0, 0) is the top-left pixel, y grows
/// downward, and the whole logical screen is stretched over the surface
/// whatever its physical size.
pub struct ScreenCamera {
    pub logical_size: (u32, u32),
}

impl ScreenCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            logical_size: (width, height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(
            0.0,
            self.logical_size.0 as f32,
            self.logical_size.1 as f32,
            0.0,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}
