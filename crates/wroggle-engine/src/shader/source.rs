use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::gl::StageKind;

/// Marker that makes a line a section directive.
pub const DIRECTIVE_MARKER: &str = "#shader";

/// Vertex and fragment source split out of one `.shader` resource.
///
/// # Format
///
/// A line containing `#shader` is a directive. If it also contains `vertex`,
/// the following lines belong to the vertex stage; otherwise, if it contains
/// `fragment`, they belong to the fragment stage; otherwise the current
/// section is kept. Lines before the first recognised directive are dropped.
///
/// Matching is substring-based and case-sensitive. A source line that merely
/// mentions `#shader` (for example in a comment) is read as a directive. This
/// is a known limitation of the format.
///
/// Line endings are normalised: each kept line ends in a single `\n`, and
/// `\r\n` input loses its `\r`. GLSL treats both the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Failure to read a shader resource.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "failed to read shader resource {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Section {
    Unassigned,
    Stage(StageKind),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Line<'a> {
    /// Directive; `None` when it names no known stage.
    Directive(Option<StageKind>),
    Content(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if !line.contains(DIRECTIVE_MARKER) {
        return Line::Content(line);
    }
    // Order matters: a line naming both stages selects vertex.
    if line.contains("vertex") {
        Line::Directive(Some(StageKind::Vertex))
    } else if line.contains("fragment") {
        Line::Directive(Some(StageKind::Fragment))
    } else {
        Line::Directive(None)
    }
}

/// Incremental splitter; feed it lines in order.
#[derive(Debug)]
struct Splitter {
    section: Section,
    out: ShaderSource,
}

impl Splitter {
    fn new() -> Self {
        Self {
            section: Section::Unassigned,
            out: ShaderSource::default(),
        }
    }

    fn push_line(&mut self, line: &str) {
        match classify(line) {
            Line::Directive(Some(kind)) => self.section = Section::Stage(kind),
            Line::Directive(None) => {}
            Line::Content(text) => {
                if let Section::Stage(kind) = self.section {
                    let buf = self.out.stage_mut(kind);
                    buf.push_str(text);
                    buf.push('\n');
                }
            }
        }
    }

    fn finish(self) -> ShaderSource {
        self.out
    }
}

impl ShaderSource {
    /// Splits an in-memory resource.
    pub fn parse_str(text: &str) -> Self {
        let mut splitter = Splitter::new();
        for line in text.lines() {
            splitter.push_line(line);
        }
        splitter.finish()
    }

    /// Splits a resource read from `reader`. Only I/O errors can fail.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut splitter = Splitter::new();
        for line in reader.lines() {
            splitter.push_line(&line?);
        }
        Ok(splitter.finish())
    }

    /// Reads and splits the resource at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let io_err = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let source = Self::parse(BufReader::new(file)).map_err(io_err)?;

        log::debug!(
            "loaded shader resource {} (vertex {} bytes, fragment {} bytes)",
            path.display(),
            source.vertex.len(),
            source.fragment.len()
        );
        Ok(source)
    }

    /// Like [`load`](Self::load), but an unreadable resource yields an empty
    /// source after logging a warning.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; continuing with empty shader source");
            Self::default()
        })
    }

    /// True when both stages are empty, which is also what a missing or
    /// marker-less resource produces.
    pub fn is_empty(&self) -> bool {
        self.vertex.is_empty() && self.fragment.is_empty()
    }

    pub fn stage(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, kind: StageKind) -> &mut String {
        match kind {
            StageKind::Vertex => &mut self.vertex,
            StageKind::Fragment => &mut self.fragment,
        }
    }
}
