use std::fmt;

use crate::gl::{Driver, ProgramHandle, StageHandle, StageKind};
use crate::gl_call;

use super::ShaderSource;

/// A stage that did not compile. Recoverable: the build carries on without it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompileFailure {
    pub stage: StageKind,
    /// Driver diagnostic text.
    pub log: String,
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compile {} shader: {}", self.stage, self.log.trim_end())
    }
}

impl std::error::Error for CompileFailure {}

/// The driver could not allocate a program object at all.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProgramError {
    Create(String),
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Create(msg) => write!(f, "failed to create program object: {msg}"),
        }
    }
}

impl std::error::Error for ProgramError {}

/// Result of a program build.
///
/// The handle is always present and owned by the caller, who must release it
/// with [`ShaderProgram::delete`]. It is only safe to draw with when
/// [`is_usable`](Self::is_usable) holds.
pub struct ShaderProgram<D: Driver + ?Sized> {
    handle: ProgramHandle<D>,
    failures: Vec<CompileFailure>,
    linked: bool,
    validated: bool,
}

impl<D: Driver + ?Sized> ShaderProgram<D> {
    pub fn handle(&self) -> ProgramHandle<D> {
        self.handle
    }

    /// Both stages compiled and the program linked.
    pub fn is_usable(&self) -> bool {
        self.failures.is_empty() && self.linked
    }

    pub fn failures(&self) -> &[CompileFailure] {
        &self.failures
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Outcome of the driver's validation against the state current at build
    /// time. Informational; drawing only requires [`is_usable`](Self::is_usable).
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Releases the program object.
    pub fn delete(self, gl: &D) {
        gl_call!(gl, gl.delete_program(self.handle));
    }
}

impl<D: Driver + ?Sized> fmt::Debug for ShaderProgram<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("failures", &self.failures)
            .field("linked", &self.linked)
            .field("validated", &self.validated)
            .finish()
    }
}

/// Compiles one stage. On failure the stage object is released and the
/// driver diagnostic is returned.
fn compile_stage<D: Driver + ?Sized>(
    gl: &D,
    kind: StageKind,
    source: &str,
) -> Result<StageHandle<D>, CompileFailure> {
    let stage = gl_call!(gl, gl.create_shader(kind)).map_err(|log| CompileFailure {
        stage: kind,
        log,
    })?;

    gl_call!(gl, gl.shader_source(stage, source));
    gl_call!(gl, gl.compile_shader(stage));

    if gl_call!(gl, gl.shader_compile_status(stage)) {
        return Ok(stage);
    }

    let log = gl_call!(gl, gl.shader_info_log(stage));
    gl_call!(gl, gl.delete_shader(stage));
    Err(CompileFailure { stage: kind, log })
}

/// Builds a program from a vertex and a fragment source.
///
/// A stage that fails to compile is logged and left out; the program is still
/// linked, validated and returned so the caller decides what to do with it.
/// Only a failure to allocate the program object itself is an error.
pub fn build_program<D: Driver + ?Sized>(
    gl: &D,
    vertex: &str,
    fragment: &str,
) -> Result<ShaderProgram<D>, ProgramError> {
    let program = gl_call!(gl, gl.create_program()).map_err(ProgramError::Create)?;

    let mut failures = Vec::new();
    let mut stages = Vec::with_capacity(2);

    for (kind, source) in [(StageKind::Vertex, vertex), (StageKind::Fragment, fragment)] {
        match compile_stage(gl, kind, source) {
            Ok(stage) => stages.push(stage),
            Err(failure) => {
                log::error!("{failure}");
                failures.push(failure);
            }
        }
    }

    for &stage in &stages {
        gl_call!(gl, gl.attach_shader(program, stage));
    }

    gl_call!(gl, gl.link_program(program));
    let linked = gl_call!(gl, gl.program_link_status(program));
    if !linked {
        let log = gl_call!(gl, gl.program_info_log(program));
        log::error!("failed to link shader program: {}", log.trim_end());
    }

    gl_call!(gl, gl.validate_program(program));
    let validated = gl_call!(gl, gl.program_validate_status(program));
    if linked && !validated {
        log::warn!("shader program did not validate against current state");
    }

    // Attached stages stay alive inside the program until it is deleted.
    for stage in stages {
        gl_call!(gl, gl.delete_shader(stage));
    }

    Ok(ShaderProgram {
        handle: program,
        failures,
        linked,
        validated,
    })
}

impl ShaderSource {
    /// Compiles and links this source. See [`build_program`].
    pub fn build<D: Driver + ?Sized>(&self, gl: &D) -> Result<ShaderProgram<D>, ProgramError> {
        build_program(gl, &self.vertex, &self.fragment)
    }
}
