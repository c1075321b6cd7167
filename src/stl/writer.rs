//! ASCII STL writer

use crate::{Error, LogFile, Mesh, Result, Triangle};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Solid name used when none is configured
const DEFAULT_SOLID_NAME: &str = "stl";

/// Format a coordinate like C's `%.16e`: one leading digit, 16 fractional
/// digits and a signed exponent of at least two digits.
///
/// Seventeen significant digits identify every finite `f64`, so reading
/// the text back yields the same bits.
pub(crate) fn format_coord(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = format!("{:.16e}", value);
    match text.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => format!(
            "{}e{}{:02}",
            mantissa,
            if exp < 0 { '-' } else { '+' },
            exp.unsigned_abs()
        ),
        _ => text,
    }
}

/// Write an ASCII STL document.
///
/// Each triangle becomes one facet whose vertices are looked up in
/// `vertices` in index order. The facet normal is always written as
/// `0 0 1`. `vertex_count` is informational only: output is driven by the
/// triangle list.
///
/// # Example
///
/// ```rust
/// use stlmesh::{write_stl, Triangle};
/// use nalgebra::Vector3;
///
/// let vertices = [Vector3::zeros(), Vector3::x(), Vector3::y()];
/// let mut out = Vec::new();
/// write_stl(&[Triangle::new(0, 1, 2)], vertices.len(), &vertices, &mut out)?;
/// assert!(String::from_utf8_lossy(&out).starts_with("solid stl\n"));
/// # Ok::<(), stlmesh::Error>(())
/// ```
pub fn write_stl<W: Write>(
    triangles: &[Triangle],
    vertex_count: usize,
    vertices: &[Vector3<f64>],
    writer: W,
) -> Result<()> {
    StlWriter::new().write(triangles, vertex_count, vertices, writer)
}

/// ASCII STL writer
#[derive(Clone)]
pub struct StlWriter {
    solid_name: String,
    log: Option<LogFile>,
}

impl Default for StlWriter {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            log: None,
        }
    }
}

impl StlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name written after `solid` and `endsolid`
    pub fn solid_name(mut self, name: impl Into<String>) -> Self {
        self.solid_name = name.into();
        self
    }

    /// Report what was written to `log`
    pub fn with_log(mut self, log: LogFile) -> Self {
        self.log = Some(log);
        self
    }

    /// Write triangles and vertices to `writer`
    pub fn write<W: Write>(
        &self,
        triangles: &[Triangle],
        vertex_count: usize,
        vertices: &[Vector3<f64>],
        mut writer: W,
    ) -> Result<()> {
        if self.solid_name.contains(['\n', '\r', '#']) {
            return Err(Error::InvalidParameter(format!(
                "Solid name must be a single line without comments: {:?}",
                self.solid_name
            )));
        }

        let result = self.write_document(triangles, vertices, &mut writer);
        if let Some(log) = &self.log {
            let _ = match &result {
                Ok(()) => log.log(format!(
                    "STL: wrote {} triangles ({} vertices)",
                    triangles.len(),
                    vertex_count
                )),
                Err(err) => log.log(format!("STL: write failed: {}", err)),
            };
        }
        result
    }

    /// Write all triangles of `mesh`
    pub fn write_mesh<W: Write>(&self, mesh: &Mesh, writer: W) -> Result<()> {
        self.write(mesh.triangles(), mesh.vertex_count(), mesh.vertices(), writer)
    }

    /// Create `path` and write `mesh` into it
    pub fn write_file<P: AsRef<Path>>(&self, mesh: &Mesh, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            Error::FileSave(format!("Failed to create STL file {}: {}", path.display(), e))
        })?;
        self.write_mesh(mesh, BufWriter::new(file))
    }

    fn write_document<W: Write>(
        &self,
        triangles: &[Triangle],
        vertices: &[Vector3<f64>],
        writer: &mut W,
    ) -> Result<()> {
        let name = self.solid_name.trim();
        if name.is_empty() {
            writeln!(writer, "solid")?;
        } else {
            writeln!(writer, "solid {}", name)?;
        }

        for (t, tri) in triangles.iter().enumerate() {
            let corners = tri
                .indices()
                .map(|i| vertices.get(i as usize).ok_or(i));
            let mut points = [Vector3::zeros(); 3];
            for (point, corner) in points.iter_mut().zip(corners) {
                *point = *corner.map_err(|i| {
                    Error::InvalidParameter(format!(
                        "Triangle {} references vertex {} but only {} vertices were given",
                        t,
                        i,
                        vertices.len()
                    ))
                })?;
            }

            writeln!(writer, "  facet normal 0 0 1")?;
            writeln!(writer, "    outer loop")?;
            for p in &points {
                writeln!(
                    writer,
                    "      vertex {} {} {}",
                    format_coord(p.x),
                    format_coord(p.y),
                    format_coord(p.z)
                )?;
            }
            writeln!(writer, "    endloop")?;
            writeln!(writer, "  endfacet")?;
        }

        if name.is_empty() {
            writeln!(writer, "endsolid")?;
        } else {
            writeln!(writer, "endsolid {}", name)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn write_to_string(triangles: &[Triangle], vertices: &[Vector3<f64>]) -> String {
        let mut out = Vec::new();
        write_stl(triangles, vertices.len(), vertices, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_coord_matches_printf() {
        assert_eq!(format_coord(0.0), "0.0000000000000000e+00");
        assert_eq!(format_coord(1.0), "1.0000000000000000e+00");
        assert_eq!(format_coord(-0.5), "-5.0000000000000000e-01");
        assert_eq!(format_coord(1500.0), "1.5000000000000000e+03");
        assert_eq!(format_coord(0.1), "1.0000000000000001e-01");
        assert_eq!(format_coord(f64::INFINITY), "inf");
        assert_eq!(format_coord(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_coord(f64::NAN), "nan");
    }

    #[test]
    fn test_format_coord_round_trips() {
        for value in [
            0.1,
            -2.0 / 3.0,
            std::f64::consts::PI,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
            123456789.123456789,
            -0.0,
        ] {
            let parsed: f64 = format_coord(value).parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{}", value);
        }
    }

    #[test]
    fn test_single_triangle_layout() {
        let vertices = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let text = write_to_string(&[Triangle::new(0, 1, 2)], &vertices);
        let expected = "solid stl
  facet normal 0 0 1
    outer loop
      vertex 0.0000000000000000e+00 0.0000000000000000e+00 0.0000000000000000e+00
      vertex 1.0000000000000000e+00 0.0000000000000000e+00 0.0000000000000000e+00
      vertex 0.0000000000000000e+00 1.0000000000000000e+00 0.0000000000000000e+00
    endloop
  endfacet
endsolid stl
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_mesh() {
        assert_eq!(write_to_string(&[], &[]), "solid stl\nendsolid stl\n");
    }

    #[test]
    fn test_follows_triangle_index_order() {
        let vertices = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
        ];
        let text = write_to_string(&[Triangle::new(3, 0, 2)], &vertices);
        let xs: Vec<&str> = text
            .lines()
            .filter_map(|l| l.trim().strip_prefix("vertex "))
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        assert_eq!(
            xs,
            [
                "4.0000000000000000e+00",
                "1.0000000000000000e+00",
                "3.0000000000000000e+00"
            ]
        );
        assert!(!text.contains("2.0000000000000000e+00"));
    }

    #[test]
    fn test_vertex_count_does_not_gate_output() {
        let vertices = [Vector3::zeros(), Vector3::x(), Vector3::y()];
        let mut out = Vec::new();
        write_stl(&[Triangle::new(0, 1, 2)], 0, &vertices, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("vertex ").count(), 3);
    }

    #[test]
    fn test_out_of_range_index() {
        let vertices = [Vector3::zeros(), Vector3::x(), Vector3::y()];
        let mut out = Vec::new();
        let err = write_stl(&[Triangle::new(0, 1, 3)], 3, &vertices, &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(!String::from_utf8_lossy(&out).contains("facet"));
    }

    #[test]
    fn test_custom_solid_name() {
        let mut out = Vec::new();
        StlWriter::new()
            .solid_name("bracket")
            .write(&[], 0, &[], &mut out)
            .unwrap();
        assert_eq!(out, b"solid bracket\nendsolid bracket\n");

        let err = StlWriter::new()
            .solid_name("two\nlines")
            .write(&[], 0, &[], Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_sink_failure_aborts() {
        struct Failing {
            budget: usize,
        }
        impl Write for Failing {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.budget < buf.len() {
                    return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
                }
                self.budget -= buf.len();
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let vertices = [Vector3::zeros(), Vector3::x(), Vector3::y()];
        for budget in [0, 20, 100] {
            let err = write_stl(
                &[Triangle::new(0, 1, 2)],
                3,
                &vertices,
                Failing { budget },
            )
            .unwrap_err();
            assert!(matches!(err, Error::Io(_)));
        }
    }
}
