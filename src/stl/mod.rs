//! ASCII STL reading and writing
//!
//! The reader accepts the grammar
//!
//! ```text
//! solid [name]
//!   facet normal <nx> <ny> <nz>
//!     outer loop
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!     endloop
//!   endfacet
//!   ...
//! endsolid [name]
//! ```
//!
//! with blank lines and `#` comments allowed anywhere. Vertices are never
//! welded: triangle `t` of a parsed mesh uses vertices `3t`, `3t + 1` and
//! `3t + 2`.

mod buffer;
mod line;
mod reader;
mod writer;

pub use reader::{read_stl, StlRead, StlReader};
pub use writer::{write_stl, StlWriter};
