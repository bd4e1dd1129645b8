use std::fmt;

use super::Driver;

/// Upper bound on codes drained per check. A lost context may keep reporting
/// `GL_CONTEXT_LOST` forever.
const MAX_DRAINED_ERRORS: usize = 64;

/// A driver-reported error attributed to one call site.
///
/// Driver errors are not recoverable: [`check_errors`] logs the fault and
/// unwinds with this value as the panic payload.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DriverFault {
    pub code: u32,
    /// Source text of the offending call.
    pub call: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl fmt::Display for DriverFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[OpenGL Error] ({} {}): {} : {}\nFile : {}",
            self.code,
            error_name(self.code),
            self.call,
            self.line,
            self.file
        )
    }
}

impl std::error::Error for DriverFault {}

/// Symbolic name for a `glGetError` code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        ::glow::INVALID_ENUM => "GL_INVALID_ENUM",
        ::glow::INVALID_VALUE => "GL_INVALID_VALUE",
        ::glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        ::glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        ::glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        ::glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        ::glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        ::glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown",
    }
}

/// Discards every pending driver error so the next check only sees errors
/// raised by the call it guards.
pub fn clear_errors<D: Driver + ?Sized>(driver: &D) {
    for _ in 0..MAX_DRAINED_ERRORS {
        if driver.pop_error().is_none() {
            return;
        }
    }
}

/// Drains the driver error queue after `call`.
///
/// The first pending code is attributed to `call`, logged, and raised as a
/// [`DriverFault`] panic. Later codes in the same drain are logged at debug
/// level only.
pub fn check_errors<D: Driver + ?Sized>(
    driver: &D,
    call: &'static str,
    file: &'static str,
    line: u32,
) {
    let Some(code) = driver.pop_error() else {
        return;
    };

    for _ in 1..MAX_DRAINED_ERRORS {
        match driver.pop_error() {
            Some(extra) => log::debug!(
                "additional driver error {extra} ({}) after {call}",
                error_name(extra)
            ),
            None => break,
        }
    }

    let fault = DriverFault { code, call, file, line };
    log::error!("{fault}");
    std::panic::panic_any(fault);
}

/// Runs one driver call with error attribution.
///
/// Clears the error queue, evaluates the call, then checks the queue. Any
/// error raised by the call stops the process with a [`DriverFault`] naming
/// the call text, file and line. `$driver` must be a reference to a
/// [`Driver`].
///
/// ```ignore
/// let linked = gl_call!(gl, gl.program_link_status(program));
/// ```
#[macro_export]
macro_rules! gl_call {
    ($driver:expr, $call:expr $(,)?) => {{
        $crate::gl::clear_errors($driver);
        let value = $call;
        $crate::gl::check_errors($driver, stringify!($call), file!(), line!());
        value
    }};
}
