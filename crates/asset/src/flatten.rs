//! Face flattening: fan triangulation plus index resolution into flat,
//! render-order float arrays.

use crate::error::{ConvertError, ConvertResult, IndexKind};
use crate::obj::{Corner, Face, Geometry};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlattenOptions {
    /// Fail on corners that omit a texcoord or normal index instead of
    /// emitting zeros.
    pub strict: bool,
    /// Emit `1 - v` for texture coordinates (OpenGL-style image origin).
    pub flip_v: bool,
}

/// Flattened geometry, one entry per triangle corner in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatGeometry {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
    pub corner_count: usize,
}

/// Expand every face into triangles fanned from its first corner and
/// resolve each corner's indices into coordinate values.
pub fn flatten(geometry: &Geometry, options: &FlattenOptions) -> ConvertResult<FlatGeometry> {
    let corner_count: usize = geometry.faces.iter().map(Face::triangle_count).sum::<usize>() * 3;
    let mut flat = FlatGeometry {
        positions: Vec::with_capacity(corner_count * 3),
        texcoords: Vec::with_capacity(corner_count * 2),
        normals: Vec::with_capacity(corner_count * 3),
        corner_count,
    };

    for face in &geometry.faces {
        for tri in 1..face.corners.len() - 1 {
            emit_corner(geometry, &face.corners[0], face.line, options, &mut flat)?;
            emit_corner(geometry, &face.corners[tri], face.line, options, &mut flat)?;
            emit_corner(geometry, &face.corners[tri + 1], face.line, options, &mut flat)?;
        }
    }

    Ok(flat)
}

fn emit_corner(
    geometry: &Geometry,
    corner: &Corner,
    line: usize,
    options: &FlattenOptions,
    flat: &mut FlatGeometry,
) -> ConvertResult<()> {
    let position = resolve(&geometry.vertices, corner.vertex, IndexKind::Vertex, line)?;
    flat.positions.extend_from_slice(&position);

    match corner.texcoord {
        Some(index) => {
            let [u, v] = resolve(&geometry.texcoords, index, IndexKind::TexCoord, line)?;
            let v = if options.flip_v { 1.0 - v } else { v };
            flat.texcoords.extend_from_slice(&[u, v]);
        }
        None if options.strict => {
            return Err(ConvertError::MissingAttribute {
                kind: IndexKind::TexCoord,
                line,
            });
        }
        None => flat.texcoords.extend_from_slice(&[0.0, 0.0]),
    }

    match corner.normal {
        Some(index) => {
            let normal = resolve(&geometry.normals, index, IndexKind::Normal, line)?;
            flat.normals.extend_from_slice(&normal);
        }
        None if options.strict => {
            return Err(ConvertError::MissingAttribute {
                kind: IndexKind::Normal,
                line,
            });
        }
        None => flat.normals.extend_from_slice(&[0.0, 0.0, 0.0]),
    }

    Ok(())
}

/// Resolve a 1-based index against its collection.
fn resolve<const N: usize>(
    collection: &[[f32; N]],
    index: usize,
    kind: IndexKind,
    line: usize,
) -> ConvertResult<[f32; N]> {
    collection
        .get(index - 1)
        .copied()
        .ok_or(ConvertError::IndexOutOfRange {
            kind,
            index,
            len: collection.len(),
            line,
        })
}
