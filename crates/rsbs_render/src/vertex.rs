use rsbs_core::entity::Rect;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl SpriteVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Four corners of `rect` in logical pixels, clockwise from top-left, with
/// the whole texture mapped across it.
pub fn quad_vertices(rect: Rect) -> [SpriteVertex; 4] {
    let left = rect.x as f32;
    let top = rect.y as f32;
    let right = left + rect.w as f32;
    let bottom = top + rect.h as f32;
    [
        SpriteVertex {
            position: [left, top],
            tex_coords: [0.0, 0.0],
        },
        SpriteVertex {
            position: [right, top],
            tex_coords: [1.0, 0.0],
        },
        SpriteVertex {
            position: [right, bottom],
            tex_coords: [1.0, 1.0],
        },
        SpriteVertex {
            position: [left, bottom],
            tex_coords: [0.0, 1.0],
        },
    ]
}

pub fn quad_indices(base: u32) -> [u32; 6] {
    [base, base + 1, base + 2, base, base + 2, base + 3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_rect() {
        let quad = quad_vertices(Rect::new(256, 176, 128, 128));
        assert_eq!(quad[0].position, [256.0, 176.0]);
        assert_eq!(quad[2].position, [384.0, 304.0]);
        assert_eq!(quad[3].tex_coords, [0.0, 1.0]);
    }

    #[test]
    fn indices_offset_by_base() {
        assert_eq!(quad_indices(4), [4, 5, 6, 4, 6, 7]);
    }
}
