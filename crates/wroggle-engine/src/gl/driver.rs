use std::fmt;

use super::handle::{BufferHandle, ProgramHandle, StageHandle, VertexArrayHandle};

/// Shader stage kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    /// Lowercase name used in diagnostics ("vertex" / "fragment").
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER` (vertex data).
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER` (index data).
    ElementArray,
}

/// The set of graphics driver calls the engine issues.
///
/// Implementations must only exist while a rendering context is current on the
/// calling thread; that is what makes these methods safe to call.
///
/// Methods never check the driver error queue themselves. Callers wrap each
/// call in [`gl_call!`](crate::gl_call).
pub trait Driver {
    type Shader: Copy + fmt::Debug + PartialEq;
    type Program: Copy + fmt::Debug + PartialEq;
    type Buffer: Copy + fmt::Debug + PartialEq;
    type VertexArray: Copy + fmt::Debug + PartialEq;
    type UniformLocation: Clone + fmt::Debug;

    /// Pops one code from the driver error queue, `None` when it is empty.
    fn pop_error(&self) -> Option<u32>;

    /// Driver `GL_VERSION` string.
    fn version_string(&self) -> String;

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<ProgramHandle<Self>, String>;
    fn delete_program(&self, program: ProgramHandle<Self>);
    fn attach_shader(&self, program: ProgramHandle<Self>, stage: StageHandle<Self>);
    fn link_program(&self, program: ProgramHandle<Self>);
    fn program_link_status(&self, program: ProgramHandle<Self>) -> bool;
    fn validate_program(&self, program: ProgramHandle<Self>);
    fn program_validate_status(&self, program: ProgramHandle<Self>) -> bool;
    fn program_info_log(&self, program: ProgramHandle<Self>) -> String;
    fn use_program(&self, program: Option<ProgramHandle<Self>>);
    fn uniform_location(
        &self,
        program: ProgramHandle<Self>,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn uniform_4_f32(&self, location: &Self::UniformLocation, value: [f32; 4]);

    // ── shader stages ─────────────────────────────────────────────────────

    fn create_shader(&self, kind: StageKind) -> Result<StageHandle<Self>, String>;
    fn shader_source(&self, stage: StageHandle<Self>, source: &str);
    fn compile_shader(&self, stage: StageHandle<Self>);
    fn shader_compile_status(&self, stage: StageHandle<Self>) -> bool;
    fn shader_info_log(&self, stage: StageHandle<Self>) -> String;
    fn delete_shader(&self, stage: StageHandle<Self>);

    // ── buffers / vertex state ────────────────────────────────────────────

    fn create_buffer(&self) -> Result<BufferHandle<Self>, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle<Self>>);
    /// Uploads `data` to the buffer bound at `target` with static-draw usage.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferHandle<Self>);

    fn create_vertex_array(&self) -> Result<VertexArrayHandle<Self>, String>;
    fn bind_vertex_array(&self, vao: Option<VertexArrayHandle<Self>>);
    fn delete_vertex_array(&self, vao: VertexArrayHandle<Self>);

    fn enable_vertex_attrib_array(&self, index: u32);
    /// Float attribute layout; `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    // ── frame ─────────────────────────────────────────────────────────────

    fn viewport(&self, width: i32, height: i32);
    fn clear_color_buffer(&self);
    /// Draws `count` `u32` indices from the bound element buffer as triangles.
    fn draw_indexed_triangles(&self, count: i32);
}
