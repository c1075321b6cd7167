//! Read an ASCII STL file, report it, and write it back out.
//!
//! Usage: cargo run --example roundtrip -- <input.stl> [output.stl]

use stlmesh::{LogFile, StlRead, StlReader, StlWriter};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() -> stlmesh::Result<()> {
    let mut args = env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        eprintln!("usage: roundtrip <input.stl> [output.stl]");
        process::exit(2);
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("out.stl"));

    let log = LogFile::new(None, true)?;

    let mesh = match StlReader::new().with_log(log.clone()).read_file(&input)? {
        StlRead::Mesh(mesh) => mesh,
        StlRead::NotStl => {
            eprintln!("{} is not an ASCII STL file", input.display());
            process::exit(1);
        }
    };

    log.log(format!("Bounding box: {}", mesh.bounding_box()))?;

    StlWriter::new()
        .with_log(log.clone())
        .write_file(&mesh, &output)?;
    log.log(format!("Wrote {}", output.display()))?;

    Ok(())
}
