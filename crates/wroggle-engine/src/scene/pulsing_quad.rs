use anyhow::{bail, Result};

use crate::anim::ColorPulse;
use crate::geometry::QuadMesh;
use crate::gl::Driver;
use crate::gl_call;
use crate::shader::{ShaderProgram, ShaderSource};

/// Name of the `vec4` color uniform the fragment stage must declare.
pub const COLOR_UNIFORM: &str = "u_Color";

/// Fixed red and blue channels; green pulses.
const BASE_COLOR: [f32; 4] = [0.8, 0.0, 0.8, 1.0];

/// One quad, one program, one animated color.
///
/// When the program did not build, the scene keeps running but only clears
/// the screen.
pub struct PulsingQuad<D: Driver + ?Sized> {
    mesh: QuadMesh<D>,
    program: ShaderProgram<D>,
    /// Present only when the program is usable.
    color: Option<D::UniformLocation>,
    pulse: ColorPulse,
}

impl<D: Driver + ?Sized> PulsingQuad<D> {
    /// Uploads the quad, builds the program and binds it.
    ///
    /// A usable program without [`COLOR_UNIFORM`] is an error; everything
    /// created so far is released before returning it.
    pub fn setup(gl: &D, source: &ShaderSource, pulse: ColorPulse) -> Result<Self> {
        let mesh = QuadMesh::upload(gl)?;

        let program = match source.build(gl) {
            Ok(program) => program,
            Err(e) => {
                mesh.delete(gl);
                return Err(e.into());
            }
        };

        if !program.is_usable() {
            log::warn!(
                "shader program is unusable ({} stage failure(s), linked: {}); drawing disabled",
                program.failures().len(),
                program.is_linked()
            );
            return Ok(Self {
                mesh,
                program,
                color: None,
                pulse,
            });
        }

        gl_call!(gl, gl.use_program(Some(program.handle())));
        let location = gl_call!(gl, gl.uniform_location(program.handle(), COLOR_UNIFORM));
        let Some(color) = location else {
            gl_call!(gl, gl.use_program(None));
            program.delete(gl);
            mesh.delete(gl);
            bail!("shader program does not declare uniform `{COLOR_UNIFORM}`");
        };

        Ok(Self {
            mesh,
            program,
            color: Some(color),
            pulse,
        })
    }

    /// Whether frames draw the quad (false means clear-only).
    pub fn is_drawing(&self) -> bool {
        self.color.is_some()
    }

    pub fn pulse(&self) -> &ColorPulse {
        &self.pulse
    }

    /// Clears, then draws the quad with this frame's color.
    pub fn frame(&mut self, gl: &D) {
        gl_call!(gl, gl.clear_color_buffer());

        let Some(color) = &self.color else {
            return;
        };

        let [r, _, b, a] = BASE_COLOR;
        let g = self.pulse.step();
        gl_call!(gl, gl.uniform_4_f32(color, [r, g, b, a]));
        self.mesh.draw(gl);
    }

    /// Releases the program and the quad's buffers.
    pub fn delete(self, gl: &D) {
        gl_call!(gl, gl.use_program(None));
        self.program.delete(gl);
        self.mesh.delete(gl);
    }
}
