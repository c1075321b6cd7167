use serial_test::serial;
use stlmesh::{Error, LogFile, Mesh, StlRead, StlReader, StlWriter, TempFolder};
use std::fs;

const SINGLE_TRIANGLE: &str = "solid stl
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid stl
";

#[test]
#[serial]
fn test_probe_formats() {
    let tmp = TempFolder::new().expect("Failed to create temp folder");

    let stl_path = tmp.path().join("a.stl");
    fs::write(&stl_path, SINGLE_TRIANGLE).expect("Failed to write");

    let obj_path = tmp.path().join("a.obj");
    fs::write(&obj_path, "# cube\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("Failed to write");

    let mut binary = b"binary header".to_vec();
    binary.resize(80, 0);
    binary.extend_from_slice(&0u32.to_le_bytes());
    let bin_path = tmp.path().join("b.stl");
    fs::write(&bin_path, &binary).expect("Failed to write");

    let reader = StlReader::new();
    assert!(reader.read_file(&stl_path).expect("STL").is_stl());
    assert!(matches!(
        reader.read_file(&obj_path).expect("OBJ should not be an error"),
        StlRead::NotStl
    ));
    assert!(matches!(
        reader.read_file(&bin_path).expect("Binary should not be an error"),
        StlRead::NotStl
    ));

    // The convenience loader has no "not STL" outcome.
    assert!(matches!(Mesh::load_stl(&obj_path), Err(Error::FileLoad(_))));
}

#[test]
#[serial]
fn test_missing_file() {
    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let err = Mesh::load_stl(tmp.path().join("missing.stl")).unwrap_err();
    assert!(matches!(err, Error::FileLoad(_)));
    assert!(err.to_string().contains("missing.stl"));
}

#[test]
#[serial]
fn test_malformed_file_reports_line() {
    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let path = tmp.path().join("bad.stl");
    fs::write(
        &path,
        SINGLE_TRIANGLE.replace("vertex 0 1 0", "vertex 0 1"),
    )
    .expect("Failed to write");

    match Mesh::load_stl(&path).unwrap_err() {
        Error::VertexFields { line, found } => {
            assert_eq!(line, 6);
            assert_eq!(found, "vertex 0 1");
        }
        err => panic!("unexpected error {:?}", err),
    }
}

#[test]
#[serial]
fn test_log_file_records_outcomes() {
    let tmp = TempFolder::new().expect("Failed to create temp folder");
    let log_path = tmp.path().join("stl.log");

    {
        let log = LogFile::new(Some(log_path.as_path()), false).expect("Failed to open log");
        let reader = StlReader::new().with_log(log.clone());

        let mesh = reader
            .read(SINGLE_TRIANGLE.as_bytes())
            .expect("Failed to parse")
            .into_mesh()
            .expect("Document should be STL");
        assert!(reader.read("solid x\nendloop\n".as_bytes()).is_err());
        assert!(!reader.read("not stl\n".as_bytes()).expect("probe").is_stl());

        StlWriter::new()
            .with_log(log)
            .write_mesh(&mesh, Vec::new())
            .expect("Failed to write");
    }

    let text = fs::read_to_string(&log_path).expect("Failed to read log");
    assert!(text.contains("STL: read 1 triangles (3 vertices)"));
    assert!(text.contains("line 2: expecting 'facet normal' or 'endsolid', got 'endloop'"));
    assert!(text.contains("STL: not an ASCII STL document"));
    assert!(text.contains("STL: wrote 1 triangles (3 vertices)"));
}
