//! Recording [`Driver`] for unit tests (no GPU required).
//!
//! Stage compilation fails when the source is blank or contains
//! [`SYNTAX_ERROR`]. A program links when a compiled vertex stage and a
//! compiled fragment stage are attached. Driver errors can be injected after
//! any named call.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use super::driver::{BufferTarget, Driver, StageKind};
use super::handle::{BufferHandle, ProgramHandle, StageHandle, VertexArrayHandle};

pub const SYNTAX_ERROR: &str = "SYNTAX_ERROR";

#[derive(Debug, Clone)]
pub struct MockStage {
    pub kind: StageKind,
    pub source: String,
    pub compiled: bool,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub validated: bool,
    pub deleted: bool,
}

#[derive(Default)]
pub struct MockDriver {
    next_name: Cell<u32>,
    calls: RefCell<Vec<String>>,
    errors: RefCell<VecDeque<u32>>,
    fail_on: RefCell<Vec<(&'static str, u32)>>,
    refuse_create: RefCell<Vec<(&'static str, usize)>>,
    stages: RefCell<HashMap<u32, MockStage>>,
    programs: RefCell<HashMap<u32, MockProgram>>,
    uploads: RefCell<Vec<(BufferTarget, Vec<u8>)>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `code` as if an earlier call had raised it.
    pub fn push_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    /// Makes the driver raise `code` every time `call` is issued.
    pub fn fail_on(&self, call: &'static str, code: u32) {
        self.fail_on.borrow_mut().push((call, code));
    }

    /// Makes `create_*` calls with this name return an error.
    pub fn refuse(&self, call: &'static str) {
        self.refuse_after(call, 0);
    }

    /// Like [`refuse`](Self::refuse), but lets the first `allowed` calls succeed.
    pub fn refuse_after(&self, call: &'static str, allowed: usize) {
        self.refuse_create.borrow_mut().push((call, allowed));
    }

    /// Names of the calls issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls issued so far, excluding error queue polling.
    pub fn driver_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "get_error")
            .collect()
    }

    pub fn stage(&self, name: u32) -> MockStage {
        self.stages.borrow()[&name].clone()
    }

    pub fn stages(&self) -> Vec<(u32, MockStage)> {
        let mut all: Vec<_> = self
            .stages
            .borrow()
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        all.sort_by_key(|(k, _)| *k);
        all
    }

    pub fn program(&self, name: u32) -> MockProgram {
        self.programs.borrow()[&name].clone()
    }

    pub fn uploads(&self) -> Vec<(BufferTarget, Vec<u8>)> {
        self.uploads.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call.to_string());
        for (name, code) in self.fail_on.borrow().iter() {
            if *name == call {
                self.errors.borrow_mut().push_back(*code);
            }
        }
    }

    fn mint(&self, call: &'static str) -> Result<u32, String> {
        self.record(call);
        let issued = self.calls.borrow().iter().filter(|c| *c == call).count();
        let refused = self
            .refuse_create
            .borrow()
            .iter()
            .any(|(name, allowed)| *name == call && issued > *allowed);
        if refused {
            return Err(format!("{call} refused by mock driver"));
        }
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        Ok(name)
    }
}

impl Driver for MockDriver {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = (u32, String);

    fn pop_error(&self) -> Option<u32> {
        self.calls.borrow_mut().push("get_error".to_string());
        self.errors.borrow_mut().pop_front()
    }

    fn version_string(&self) -> String {
        self.record("version_string");
        "3.3.0 Mock".to_string()
    }

    fn create_program(&self) -> Result<ProgramHandle<Self>, String> {
        let name = self.mint("create_program")?;
        self.programs.borrow_mut().insert(name, MockProgram::default());
        Ok(ProgramHandle::from_raw(name))
    }

    fn delete_program(&self, program: ProgramHandle<Self>) {
        self.record("delete_program");
        if let Some(p) = self.programs.borrow_mut().get_mut(&program.raw()) {
            p.deleted = true;
        }
    }

    fn attach_shader(&self, program: ProgramHandle<Self>, stage: StageHandle<Self>) {
        self.record("attach_shader");
        if let Some(p) = self.programs.borrow_mut().get_mut(&program.raw()) {
            p.attached.push(stage.raw());
        }
    }

    fn link_program(&self, program: ProgramHandle<Self>) {
        self.record("link_program");
        let stages = self.stages.borrow();
        let compiled = |kind: StageKind, attached: &[u32]| {
            attached
                .iter()
                .filter_map(|n| stages.get(n))
                .any(|s| s.kind == kind && s.compiled)
        };
        if let Some(p) = self.programs.borrow_mut().get_mut(&program.raw()) {
            p.linked = compiled(StageKind::Vertex, &p.attached)
                && compiled(StageKind::Fragment, &p.attached);
        }
    }

    fn program_link_status(&self, program: ProgramHandle<Self>) -> bool {
        self.record("program_link_status");
        self.programs
            .borrow()
            .get(&program.raw())
            .is_some_and(|p| p.linked)
    }

    fn validate_program(&self, program: ProgramHandle<Self>) {
        self.record("validate_program");
        if let Some(p) = self.programs.borrow_mut().get_mut(&program.raw()) {
            p.validated = p.linked;
        }
    }

    fn program_validate_status(&self, program: ProgramHandle<Self>) -> bool {
        self.record("program_validate_status");
        self.programs
            .borrow()
            .get(&program.raw())
            .is_some_and(|p| p.validated)
    }

    fn program_info_log(&self, program: ProgramHandle<Self>) -> String {
        self.record("program_info_log");
        match self.programs.borrow().get(&program.raw()) {
            Some(p) if !p.linked => "error: program has unresolved stages".to_string(),
            _ => String::new(),
        }
    }

    fn use_program(&self, _program: Option<ProgramHandle<Self>>) {
        self.record("use_program");
    }

    fn uniform_location(
        &self,
        program: ProgramHandle<Self>,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        self.record("uniform_location");
        let programs = self.programs.borrow();
        let p = programs.get(&program.raw())?;
        if !p.linked {
            return None;
        }
        let declared = p
            .attached
            .iter()
            .filter_map(|n| self.stages.borrow().get(n).cloned())
            .any(|s| s.source.contains(&format!("uniform vec4 {name};")));
        declared.then(|| (program.raw(), name.to_string()))
    }

    fn uniform_4_f32(&self, _location: &Self::UniformLocation, _value: [f32; 4]) {
        self.record("uniform_4_f32");
    }

    fn create_shader(&self, kind: StageKind) -> Result<StageHandle<Self>, String> {
        let name = self.mint("create_shader")?;
        self.stages.borrow_mut().insert(
            name,
            MockStage {
                kind,
                source: String::new(),
                compiled: false,
                deleted: false,
            },
        );
        Ok(StageHandle::from_raw(name))
    }

    fn shader_source(&self, stage: StageHandle<Self>, source: &str) {
        self.record("shader_source");
        if let Some(s) = self.stages.borrow_mut().get_mut(&stage.raw()) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, stage: StageHandle<Self>) {
        self.record("compile_shader");
        if let Some(s) = self.stages.borrow_mut().get_mut(&stage.raw()) {
            s.compiled = !s.source.trim().is_empty() && !s.source.contains(SYNTAX_ERROR);
        }
    }

    fn shader_compile_status(&self, stage: StageHandle<Self>) -> bool {
        self.record("shader_compile_status");
        self.stages
            .borrow()
            .get(&stage.raw())
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, stage: StageHandle<Self>) -> String {
        self.record("shader_info_log");
        match self.stages.borrow().get(&stage.raw()) {
            Some(s) if s.source.trim().is_empty() => "0:0(0): error: no shader source".to_string(),
            Some(s) if !s.compiled => format!("0:1(1): error: syntax error in {} stage", s.kind),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, stage: StageHandle<Self>) {
        self.record("delete_shader");
        if let Some(s) = self.stages.borrow_mut().get_mut(&stage.raw()) {
            s.deleted = true;
        }
    }

    fn create_buffer(&self) -> Result<BufferHandle<Self>, String> {
        self.mint("create_buffer").map(BufferHandle::from_raw)
    }

    fn bind_buffer(&self, _target: BufferTarget, _buffer: Option<BufferHandle<Self>>) {
        self.record("bind_buffer");
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record("buffer_data");
        self.uploads.borrow_mut().push((target, data.to_vec()));
    }

    fn delete_buffer(&self, _buffer: BufferHandle<Self>) {
        self.record("delete_buffer");
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle<Self>, String> {
        self.mint("create_vertex_array").map(VertexArrayHandle::from_raw)
    }

    fn bind_vertex_array(&self, _vao: Option<VertexArrayHandle<Self>>) {
        self.record("bind_vertex_array");
    }

    fn delete_vertex_array(&self, _vao: VertexArrayHandle<Self>) {
        self.record("delete_vertex_array");
    }

    fn enable_vertex_attrib_array(&self, _index: u32) {
        self.record("enable_vertex_attrib_array");
    }

    fn vertex_attrib_pointer_f32(&self, _index: u32, _components: i32, _stride: i32, _offset: i32) {
        self.record("vertex_attrib_pointer_f32");
    }

    fn viewport(&self, _width: i32, _height: i32) {
        self.record("viewport");
    }

    fn clear_color_buffer(&self) {
        self.record("clear_color_buffer");
    }

    fn draw_indexed_triangles(&self, _count: i32) {
        self.record("draw_indexed_triangles");
    }
}
