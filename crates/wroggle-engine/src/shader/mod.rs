//! Shader resources: splitting a `.shader` file into stages and building a
//! program from them.

mod program;
mod source;

pub use program::{build_program, CompileFailure, ProgramError, ShaderProgram};
pub use source::{ShaderSource, SourceError, DIRECTIVE_MARKER};
