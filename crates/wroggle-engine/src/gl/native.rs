use std::ffi::{c_void, CStr};

use ::glow::HasContext;

use super::driver::{BufferTarget, Driver, StageKind};
use super::handle::{BufferHandle, ProgramHandle, StageHandle, VertexArrayHandle};

/// [`Driver`] backed by a `glow` context.
///
/// Only [`GlContext`](crate::device::GlContext) constructs this type, after
/// making its context current on the owning thread. The unsafe `glow` calls
/// below rely on that.
pub struct GlowDriver {
    gl: ::glow::Context,
    validation: ProgramValidation,
}

impl GlowDriver {
    pub(crate) fn new(gl: ::glow::Context, validation: ProgramValidation) -> Self {
        Self { gl, validation }
    }
}

type ValidateProgramFn = unsafe extern "system" fn(program: u32);
type GetProgramIvFn = unsafe extern "system" fn(program: u32, pname: u32, params: *mut i32);

/// `glValidateProgram` and `glGetProgramiv`, which `glow` does not expose.
///
/// Loaded through the same proc-address loader as the `glow` context.
pub(crate) struct ProgramValidation {
    validate: ValidateProgramFn,
    get_iv: GetProgramIvFn,
}

impl ProgramValidation {
    /// Resolves both entry points, `None` if the driver lacks either.
    ///
    /// # Safety
    /// `loader` must return null or the address of the named GL function.
    pub(crate) unsafe fn load(mut loader: impl FnMut(&CStr) -> *const c_void) -> Option<Self> {
        let validate = loader(c"glValidateProgram");
        let get_iv = loader(c"glGetProgramiv");
        if validate.is_null() || get_iv.is_null() {
            return None;
        }

        // SAFETY: non-null addresses of these functions, per the caller.
        unsafe {
            Some(Self {
                validate: std::mem::transmute::<*const c_void, ValidateProgramFn>(validate),
                get_iv: std::mem::transmute::<*const c_void, GetProgramIvFn>(get_iv),
            })
        }
    }

    unsafe fn validate(&self, program: u32) {
        unsafe { (self.validate)(program) }
    }

    unsafe fn status(&self, program: u32) -> bool {
        let mut status = 0;
        unsafe { (self.get_iv)(program, ::glow::VALIDATE_STATUS, &mut status) };
        status != 0
    }
}

fn stage_enum(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => ::glow::VERTEX_SHADER,
        StageKind::Fragment => ::glow::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => ::glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => ::glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl Driver for GlowDriver {
    type Shader = ::glow::Shader;
    type Program = ::glow::Program;
    type Buffer = ::glow::Buffer;
    type VertexArray = ::glow::VertexArray;
    type UniformLocation = ::glow::UniformLocation;

    fn pop_error(&self) -> Option<u32> {
        match unsafe { self.gl.get_error() } {
            ::glow::NO_ERROR => None,
            code => Some(code),
        }
    }

    fn version_string(&self) -> String {
        unsafe { self.gl.get_parameter_string(::glow::VERSION) }
    }

    fn create_program(&self) -> Result<ProgramHandle<Self>, String> {
        unsafe { self.gl.create_program() }.map(ProgramHandle::from_raw)
    }

    fn delete_program(&self, program: ProgramHandle<Self>) {
        unsafe { self.gl.delete_program(program.raw()) }
    }

    fn attach_shader(&self, program: ProgramHandle<Self>, stage: StageHandle<Self>) {
        unsafe { self.gl.attach_shader(program.raw(), stage.raw()) }
    }

    fn link_program(&self, program: ProgramHandle<Self>) {
        unsafe { self.gl.link_program(program.raw()) }
    }

    fn program_link_status(&self, program: ProgramHandle<Self>) -> bool {
        unsafe { self.gl.get_program_link_status(program.raw()) }
    }

    fn validate_program(&self, program: ProgramHandle<Self>) {
        unsafe { self.validation.validate(program.raw().0.get()) }
    }

    fn program_validate_status(&self, program: ProgramHandle<Self>) -> bool {
        unsafe { self.validation.status(program.raw().0.get()) }
    }

    fn program_info_log(&self, program: ProgramHandle<Self>) -> String {
        unsafe { self.gl.get_program_info_log(program.raw()) }
    }

    fn use_program(&self, program: Option<ProgramHandle<Self>>) {
        unsafe { self.gl.use_program(program.map(ProgramHandle::raw)) }
    }

    fn uniform_location(
        &self,
        program: ProgramHandle<Self>,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program.raw(), name) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, [x, y, z, w]: [f32; 4]) {
        unsafe { self.gl.uniform_4_f32(Some(location), x, y, z, w) }
    }

    fn create_shader(&self, kind: StageKind) -> Result<StageHandle<Self>, String> {
        unsafe { self.gl.create_shader(stage_enum(kind)) }.map(StageHandle::from_raw)
    }

    fn shader_source(&self, stage: StageHandle<Self>, source: &str) {
        unsafe { self.gl.shader_source(stage.raw(), source) }
    }

    fn compile_shader(&self, stage: StageHandle<Self>) {
        unsafe { self.gl.compile_shader(stage.raw()) }
    }

    fn shader_compile_status(&self, stage: StageHandle<Self>) -> bool {
        unsafe { self.gl.get_shader_compile_status(stage.raw()) }
    }

    fn shader_info_log(&self, stage: StageHandle<Self>) -> String {
        unsafe { self.gl.get_shader_info_log(stage.raw()) }
    }

    fn delete_shader(&self, stage: StageHandle<Self>) {
        unsafe { self.gl.delete_shader(stage.raw()) }
    }

    fn create_buffer(&self) -> Result<BufferHandle<Self>, String> {
        unsafe { self.gl.create_buffer() }.map(BufferHandle::from_raw)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle<Self>>) {
        unsafe { self.gl.bind_buffer(target_enum(target), buffer.map(BufferHandle::raw)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(target_enum(target), data, ::glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle<Self>) {
        unsafe { self.gl.delete_buffer(buffer.raw()) }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle<Self>, String> {
        unsafe { self.gl.create_vertex_array() }.map(VertexArrayHandle::from_raw)
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayHandle<Self>>) {
        unsafe { self.gl.bind_vertex_array(vao.map(VertexArrayHandle::raw)) }
    }

    fn delete_vertex_array(&self, vao: VertexArrayHandle<Self>) {
        unsafe { self.gl.delete_vertex_array(vao.raw()) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, ::glow::FLOAT, false, stride, offset)
        }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe { self.gl.viewport(0, 0, width, height) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(::glow::COLOR_BUFFER_BIT) }
    }

    fn draw_indexed_triangles(&self, count: i32) {
        unsafe { self.gl.draw_elements(::glow::TRIANGLES, count, ::glow::UNSIGNED_INT, 0) }
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    static VALIDATED: AtomicU32 = AtomicU32::new(0);

    unsafe extern "system" fn fake_validate(program: u32) {
        VALIDATED.store(program, Ordering::SeqCst);
    }

    unsafe extern "system" fn fake_get_iv(program: u32, pname: u32, params: *mut i32) {
        // Odd program names validate.
        let status = if pname == ::glow::VALIDATE_STATUS { program % 2 } else { 0 };
        unsafe { *params = status as i32 };
    }

    fn fake_loader(name: &CStr) -> *const c_void {
        match name.to_bytes() {
            b"glValidateProgram" => fake_validate as *const c_void,
            b"glGetProgramiv" => fake_get_iv as *const c_void,
            _ => ptr::null(),
        }
    }

    #[test]
    fn loads_and_calls_entry_points() {
        let validation = unsafe { ProgramValidation::load(fake_loader) }.unwrap();

        unsafe { validation.validate(7) };
        assert_eq!(VALIDATED.load(Ordering::SeqCst), 7);
        assert!(unsafe { validation.status(7) });
        assert!(!unsafe { validation.status(8) });
    }

    #[test]
    fn missing_entry_point_is_none() {
        let loader = |name: &CStr| match name.to_bytes() {
            b"glValidateProgram" => fake_validate as *const c_void,
            _ => ptr::null(),
        };
        assert!(unsafe { ProgramValidation::load(loader) }.is_none());
    }
}
