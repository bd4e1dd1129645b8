use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};

use crate::gl::{BufferHandle, BufferTarget, Driver, VertexArrayHandle};
use crate::gl_call;

/// Attribute slot of the vertex position (`layout(location = 0)`).
pub const POSITION_ATTRIBUTE: u32 = 0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2], // clip space
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-0.5, -0.5] },
    QuadVertex { pos: [0.5, -0.5] },
    QuadVertex { pos: [0.5, 0.5] },
    QuadVertex { pos: [-0.5, 0.5] },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// GPU-resident quad: one vertex array, one vertex buffer, one index buffer.
///
/// Owned by the frame driver; call [`delete`](Self::delete) exactly once at
/// shutdown.
pub struct QuadMesh<D: Driver + ?Sized> {
    vao: VertexArrayHandle<D>,
    vbo: BufferHandle<D>,
    ibo: BufferHandle<D>,
}

impl<D: Driver + ?Sized> QuadMesh<D> {
    /// Uploads the quad and leaves its vertex array bound.
    pub fn upload(gl: &D) -> Result<Self> {
        // Core profiles reject attribute setup without a bound vertex array.
        let vao = gl_call!(gl, gl.create_vertex_array())
            .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;
        gl_call!(gl, gl.bind_vertex_array(Some(vao)));

        let vbo = match gl_call!(gl, gl.create_buffer()) {
            Ok(vbo) => vbo,
            Err(e) => {
                gl_call!(gl, gl.bind_vertex_array(None));
                gl_call!(gl, gl.delete_vertex_array(vao));
                return Err(anyhow!("failed to create vertex buffer: {e}"));
            }
        };
        gl_call!(gl, gl.bind_buffer(BufferTarget::Array, Some(vbo)));
        gl_call!(
            gl,
            gl.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&QUAD_VERTICES))
        );

        let ibo = match gl_call!(gl, gl.create_buffer()) {
            Ok(ibo) => ibo,
            Err(e) => {
                gl_call!(gl, gl.bind_vertex_array(None));
                gl_call!(gl, gl.delete_buffer(vbo));
                gl_call!(gl, gl.delete_vertex_array(vao));
                return Err(anyhow!("failed to create index buffer: {e}"));
            }
        };
        gl_call!(gl, gl.bind_buffer(BufferTarget::ElementArray, Some(ibo)));
        gl_call!(
            gl,
            gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(&QUAD_INDICES))
        );

        let stride = std::mem::size_of::<QuadVertex>() as i32;
        gl_call!(gl, gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE));
        gl_call!(gl, gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, 2, stride, 0));

        log::debug!(
            "uploaded quad: {} vertices, {} indices",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Ok(Self { vao, vbo, ibo })
    }

    /// Draws the quad with whatever program is bound.
    pub fn draw(&self, gl: &D) {
        gl_call!(gl, gl.draw_indexed_triangles(QUAD_INDICES.len() as i32));
    }

    pub fn delete(self, gl: &D) {
        gl_call!(gl, gl.bind_vertex_array(None));
        gl_call!(gl, gl.delete_buffer(self.ibo));
        gl_call!(gl, gl.delete_buffer(self.vbo));
        gl_call!(gl, gl.delete_vertex_array(self.vao));
    }
}
