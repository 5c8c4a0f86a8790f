use crate::errors::TpmsError;
use crate::mesh::Mesh;
use crate::triangulated::{Triangulated3D, facet_normal};
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::Path;

/// STL flavour to write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Export to ASCII STL
///
/// Facet normals come from the triangle winding.
///
/// ```rust
/// # use tpmsgen::io::to_stl_ascii;
/// # use tpmsgen::mesh::Mesh;
/// # use nalgebra::Point3;
/// let mesh = Mesh {
///     triangles: vec![[Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)]],
/// };
/// let text = to_stl_ascii(&mesh, "my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D + ?Sized>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri| {
        let n = facet_normal(tri);
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Binary STL has no room for a solid name, so only the triangles are written.
pub fn to_stl_binary<T: Triangulated3D + ?Sized>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::with_capacity(shape.triangle_count());

    shape.visit_triangles(|tri| {
        let n = facet_normal(tri);
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Write `shape` to `path`, creating or truncating the file.
///
/// An empty surface still produces a valid file with zero facets.
pub fn write_stl<T: Triangulated3D + ?Sized>(
    shape: &T,
    path: impl AsRef<Path>,
    format: StlFormat,
) -> Result<(), TpmsError> {
    let path = path.as_ref();
    let count = shape.triangle_count();
    if count == 0 {
        tracing::warn!(path = %path.display(), "writing an STL without triangles");
    }
    let bytes = match format {
        StlFormat::Binary => to_stl_binary(shape)?,
        StlFormat::Ascii => {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("tpms");
            to_stl_ascii(shape, name).into_bytes()
        }
    };
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), triangles = count, ?format, "wrote STL");
    Ok(())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    pub fn write_stl(&self, path: impl AsRef<Path>, format: StlFormat) -> Result<(), TpmsError> {
        self::write_stl(self, path, format)
    }
}
