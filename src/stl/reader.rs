//! ASCII STL reader
//!
//! The document is consumed line by line. Each normalized line is handed to
//! the transition function of the current [`State`]; vertices are collected
//! into a flat buffer and the triangle list is derived once `endsolid` has
//! been seen and the stream is exhausted.

use super::buffer::VertexBuffer;
use super::line::{is_space, normalize};
use crate::{Error, LogFile, Mesh, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Outcome of reading a stream that did not fail
#[derive(Debug)]
pub enum StlRead {
    /// The stream was a complete ASCII STL document
    Mesh(Mesh),
    /// The first significant line does not start with `solid`
    NotStl,
}

impl StlRead {
    /// The parsed mesh, if the stream was STL
    pub fn into_mesh(self) -> Option<Mesh> {
        match self {
            StlRead::Mesh(mesh) => Some(mesh),
            StlRead::NotStl => None,
        }
    }

    pub fn is_stl(&self) -> bool {
        matches!(self, StlRead::Mesh(_))
    }
}

/// Position in the STL grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    FacetHeader,
    LoopHeader,
    /// Inside `outer loop`, holding the number of vertices read so far
    Vertex(u8),
    LoopEnd,
    FacetEnd,
    End,
}

impl State {
    fn expected(self) -> &'static str {
        match self {
            State::Start => "'solid'",
            State::FacetHeader => "'facet normal' or 'endsolid'",
            State::LoopHeader => "'outer loop'",
            State::Vertex(_) => "'vertex'",
            State::LoopEnd => "'endloop'",
            State::FacetEnd => "'endfacet'",
            State::End => "end of document",
        }
    }
}

enum Step {
    Continue,
    NotStl,
}

struct Parser {
    state: State,
    vertices: VertexBuffer,
}

impl Parser {
    fn new() -> Result<Self> {
        Ok(Self {
            state: State::Start,
            vertices: VertexBuffer::new()?,
        })
    }

    fn step(&mut self, line: usize, text: &str) -> Result<Step> {
        let next = match self.state {
            State::Start => match start(text) {
                Some(next) => next,
                None => return Ok(Step::NotStl),
            },
            State::FacetHeader => facet_header(line, text)?,
            State::LoopHeader => {
                keyword(line, text, State::LoopHeader, "outer loop", State::Vertex(0))?
            }
            State::Vertex(count) => self.vertex(line, text, count)?,
            State::LoopEnd => keyword(line, text, State::LoopEnd, "endloop", State::FacetEnd)?,
            State::FacetEnd => {
                keyword(line, text, State::FacetEnd, "endfacet", State::FacetHeader)?
            }
            State::End => {
                return Err(Error::ExtraContent {
                    line,
                    found: text.to_string(),
                })
            }
        };
        self.state = next;
        Ok(Step::Continue)
    }

    fn vertex(&mut self, line: usize, text: &str, count: u8) -> Result<State> {
        let [x, y, z] = parse_vertex(line, text)?;
        self.vertices.push(x, y, z)?;
        Ok(if count + 1 == 3 {
            State::LoopEnd
        } else {
            State::Vertex(count + 1)
        })
    }

    fn finish(self) -> Result<Mesh> {
        if self.state != State::End {
            return Err(Error::Incomplete {
                expected: self.state.expected(),
            });
        }
        debug_assert_eq!(self.vertices.point_count() % 3, 0);
        Mesh::from_unshared_vertices(self.vertices.into_points())
    }
}

fn start(text: &str) -> Option<State> {
    text.starts_with("solid").then_some(State::FacetHeader)
}

fn facet_header(line: usize, text: &str) -> Result<State> {
    if text.starts_with("endsolid") {
        Ok(State::End)
    } else if text.starts_with("facet normal") {
        Ok(State::LoopHeader)
    } else {
        Err(unexpected(line, State::FacetHeader, text))
    }
}

/// Lines that must consist of `word` alone
fn keyword(line: usize, text: &str, state: State, word: &str, next: State) -> Result<State> {
    if text == word {
        Ok(next)
    } else {
        Err(unexpected(line, state, text))
    }
}

fn unexpected(line: usize, state: State, text: &str) -> Error {
    Error::UnexpectedLine {
        line,
        expected: state.expected(),
        found: text.to_string(),
    }
}

/// Parse `vertex X Y Z`, requiring exactly three numeric fields
fn parse_vertex(line: usize, text: &str) -> Result<[f64; 3]> {
    let rest = match text.strip_prefix("vertex") {
        Some(rest) if rest.is_empty() || rest.starts_with(is_space) => rest,
        _ => return Err(unexpected(line, State::Vertex(0), text)),
    };

    let fields_error = || Error::VertexFields {
        line,
        found: text.to_string(),
    };

    let mut coords = [0.0; 3];
    let mut count = 0;
    for field in rest.split(is_space).filter(|f| !f.is_empty()) {
        if count == 3 {
            return Err(fields_error());
        }
        coords[count] = field.parse::<f64>().map_err(|_| fields_error())?;
        count += 1;
    }
    if count != 3 {
        return Err(fields_error());
    }
    Ok(coords)
}

/// Parse an ASCII STL document.
///
/// Returns [`StlRead::NotStl`] when the first non-blank line does not begin
/// with `solid`, so callers can probe a stream without treating a foreign
/// format as an error.
///
/// # Example
///
/// ```rust
/// use stlmesh::{read_stl, StlRead};
///
/// let doc = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
/// let mesh = read_stl(doc.as_bytes())?.into_mesh().unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// # Ok::<(), stlmesh::Error>(())
/// ```
pub fn read_stl<R: BufRead>(reader: R) -> Result<StlRead> {
    StlReader::new().read(reader)
}

/// ASCII STL reader with optional logging
#[derive(Clone, Default)]
pub struct StlReader {
    log: Option<LogFile>,
}

impl StlReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report diagnostics and results to `log`
    pub fn with_log(mut self, log: LogFile) -> Self {
        self.log = Some(log);
        self
    }

    /// Parse a document from `reader`
    pub fn read<R: BufRead>(&self, reader: R) -> Result<StlRead> {
        let result = parse(reader);
        if let Some(log) = &self.log {
            let _ = match &result {
                Ok(StlRead::Mesh(mesh)) => log.log(format!(
                    "STL: read {} triangles ({} vertices)",
                    mesh.triangle_count(),
                    mesh.vertex_count()
                )),
                Ok(StlRead::NotStl) => log.log("STL: not an ASCII STL document"),
                Err(err) => log.log(format!("STL: {}", err)),
            };
        }
        result
    }

    /// Open `path` and parse it
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<StlRead> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::FileLoad(format!("Failed to open STL file {}: {}", path.display(), e))
        })?;
        self.read(BufReader::new(file))
    }
}

fn parse<R: BufRead>(mut reader: R) -> Result<StlRead> {
    let mut parser = Parser::new()?;
    let mut raw = Vec::new();
    let mut line = 0;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line += 1;

        let decoded = String::from_utf8_lossy(&raw);
        let Some(text) = normalize(&decoded) else {
            continue;
        };
        if let Step::NotStl = parser.step(line, text)? {
            return Ok(StlRead::NotStl);
        }
    }

    parser.finish().map(StlRead::Mesh)
}
