//! Triangle mesh representation

use crate::stl::{StlRead, StlReader, StlWriter};
use crate::{BBox3, Error, Result, Triangle};
use nalgebra::Vector3;
use std::io::{BufRead, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangle mesh
///
/// Vertices are stored as double-precision points, triangles as index
/// triples into the vertex list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    vertices: Vec<Vector3<f64>>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for the given counts
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Build a mesh from vertices and triangles, checking every index
    pub fn from_parts(vertices: Vec<Vector3<f64>>, triangles: Vec<Triangle>) -> Result<Self> {
        let count = vertices.len();
        if let Some(tri) = triangles
            .iter()
            .find(|tri| tri.indices().iter().any(|&i| i as usize >= count))
        {
            return Err(Error::InvalidParameter(format!(
                "{} references a vertex outside 0..{}",
                tri, count
            )));
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Build a mesh where every consecutive group of three vertices forms
    /// one triangle, i.e. triangle `t` is `(3t, 3t + 1, 3t + 2)`.
    pub fn from_unshared_vertices(vertices: Vec<Vector3<f64>>) -> Result<Self> {
        if vertices.len() % 3 != 0 {
            return Err(Error::InvalidParameter(format!(
                "Vertex count {} is not a multiple of 3",
                vertices.len()
            )));
        }
        let count = u32::try_from(vertices.len() / 3).map_err(|_| {
            Error::InvalidParameter(format!("Too many vertices: {}", vertices.len()))
        })?;
        // 3 * count must fit as well, for the last index.
        if count.checked_mul(3).is_none() {
            return Err(Error::InvalidParameter(format!(
                "Too many vertices: {}",
                vertices.len()
            )));
        }
        let triangles = (0..count).map(Triangle::unshared).collect();
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Add a vertex
    ///
    /// Returns the vertex index.
    pub fn add_vertex(&mut self, pos: Vector3<f64>) -> u32 {
        self.vertices.push(pos);
        (self.vertices.len() - 1) as u32
    }

    /// Add a triangle
    ///
    /// Returns the triangle index.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stlmesh::{Mesh, Triangle};
    /// use nalgebra::Vector3;
    ///
    /// let mut mesh = Mesh::new();
    /// let v0 = mesh.add_vertex(Vector3::new(0.0, 0.0, 0.0));
    /// let v1 = mesh.add_vertex(Vector3::new(1.0, 0.0, 0.0));
    /// let v2 = mesh.add_vertex(Vector3::new(0.0, 1.0, 0.0));
    /// mesh.add_triangle(Triangle::new(v0, v1, v2))?;
    /// # Ok::<(), stlmesh::Error>(())
    /// ```
    pub fn add_triangle(&mut self, tri: Triangle) -> Result<u32> {
        if tri
            .indices()
            .iter()
            .any(|&i| i as usize >= self.vertices.len())
        {
            return Err(Error::InvalidParameter(format!(
                "{} references a vertex outside 0..{}",
                tri,
                self.vertices.len()
            )));
        }
        self.triangles.push(tri);
        Ok((self.triangles.len() - 1) as u32)
    }

    /// Add a triangle by vertex positions
    pub fn add_triangle_vertices(
        &mut self,
        a: Vector3<f64>,
        b: Vector3<f64>,
        c: Vector3<f64>,
    ) -> u32 {
        let v0 = self.add_vertex(a);
        let v1 = self.add_vertex(b);
        let v2 = self.add_vertex(c);
        self.triangles.push(Triangle::new(v0, v1, v2));
        (self.triangles.len() - 1) as u32
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get a vertex by index
    pub fn get_vertex(&self, index: usize) -> Option<Vector3<f64>> {
        self.vertices.get(index).copied()
    }

    /// Get a triangle by index
    pub fn get_triangle(&self, index: usize) -> Option<Triangle> {
        self.triangles.get(index).copied()
    }

    /// Corner positions of triangle `index`
    pub fn triangle_vertices(&self, index: usize) -> Option<[Vector3<f64>; 3]> {
        let tri = self.get_triangle(index)?;
        Some([
            self.get_vertex(tri.v0 as usize)?,
            self.get_vertex(tri.v1 as usize)?,
            self.get_vertex(tri.v2 as usize)?,
        ])
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Vertices flattened to `x, y, z, x, y, z, ...`
    pub fn vertex_coords(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    /// Split into vertices and triangles
    pub fn into_parts(self) -> (Vec<Vector3<f64>>, Vec<Triangle>) {
        (self.vertices, self.triangles)
    }

    /// Get the bounding box of the mesh vertices
    pub fn bounding_box(&self) -> BBox3 {
        let mut bbox = BBox3::empty();
        for v in &self.vertices {
            bbox.include_point(*v);
        }
        bbox
    }

    /// Read an ASCII STL document.
    ///
    /// A stream that is not STL is reported as [`StlRead::NotStl`].
    pub fn read_stl<R: BufRead>(reader: R) -> Result<StlRead> {
        StlReader::new().read(reader)
    }

    /// Load from an ASCII STL file
    ///
    /// Unlike [`Mesh::read_stl`], a file that is not STL is an error.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use stlmesh::Mesh;
    ///
    /// let mesh = Mesh::load_stl("input.stl")?;
    /// println!("{} triangles", mesh.triangle_count());
    /// # Ok::<(), stlmesh::Error>(())
    /// ```
    pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        StlReader::new().read_file(path)?.into_mesh().ok_or_else(|| {
            Error::FileLoad(format!("{} is not an ASCII STL file", path.display()))
        })
    }

    /// Write as an ASCII STL document
    pub fn write_stl<W: Write>(&self, writer: W) -> Result<()> {
        StlWriter::new().write_mesh(self, writer)
    }

    /// Save to an ASCII STL file
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        StlWriter::new().write_file(self, path)
    }
}
