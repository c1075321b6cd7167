//! # stlmesh
//!
//! Strict reader and writer for ASCII STL documents.
//!
//! Parsing yields an indexed triangle mesh whose triangles each own three
//! private vertices; writing emits one facet per triangle with coordinates
//! in round-trip-safe scientific notation.
//!
//! ## Example
//!
//! ```rust
//! use stlmesh::{read_stl, StlRead};
//!
//! let doc = "solid stl
//!   facet normal 0 0 1
//!     outer loop
//!       vertex 0 0 0
//!       vertex 1 0 0
//!       vertex 0 1 0
//!     endloop
//!   endfacet
//! endsolid stl
//! ";
//!
//! match read_stl(doc.as_bytes())? {
//!     StlRead::Mesh(mesh) => {
//!         let mut out = Vec::new();
//!         mesh.write_stl(&mut out)?;
//!     }
//!     StlRead::NotStl => println!("try another format"),
//! }
//! # Ok::<(), stlmesh::Error>(())
//! ```

pub mod error;
pub mod log;
pub mod mesh;
pub mod stl;
pub mod types;
pub mod utils;

// Re-exports
pub use error::{Error, Result};
pub use log::LogFile;
pub use mesh::Mesh;
pub use stl::{read_stl, write_stl, StlRead, StlReader, StlWriter};
pub use types::{BBox3, Triangle};
pub use utils::TempFolder;
