//! OBJ geometry parser: positions, texture coordinates, normals and faces.

use crate::error::{ConvertError, ConvertResult};

/// One `v/vt/vn` triple within a face. Indices are kept 1-based as written;
/// resolution against the collections happens during flattening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// A polygonal face, at least three corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub corners: Vec<Corner>,
    /// 1-based source line, carried for resolution diagnostics.
    pub line: usize,
}

impl Face {
    /// Number of triangles a fan decomposition of this face yields.
    pub fn triangle_count(&self) -> usize {
        self.corners.len().saturating_sub(2)
    }
}

/// Parsed geometry file, collections in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

/// Parse complete OBJ file contents. Lines with an unrecognized leading
/// token (comments, groups, object names, smoothing flags) are skipped.
pub fn parse_obj(contents: &str) -> ConvertResult<Geometry> {
    let mut geometry = Geometry::default();

    for (line_no, line) in contents.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                geometry.vertices.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                geometry.texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                geometry.normals.push([nx, ny, nz]);
            }
            "f" => {
                let corners = parts
                    .map(|token| parse_corner(token, line_no))
                    .collect::<ConvertResult<Vec<Corner>>>()?;
                if corners.len() < 3 {
                    return Err(ConvertError::malformed(
                        line_no,
                        format!("face has {} corners, need at least 3", corners.len()),
                    ));
                }
                geometry.faces.push(Face {
                    corners,
                    line: line_no,
                });
            }
            _ => {}
        }
    }

    Ok(geometry)
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> ConvertResult<f32> {
    let token =
        value.ok_or_else(|| ConvertError::malformed(line_no, format!("missing {what}")))?;
    token.parse::<f32>().map_err(|_| {
        ConvertError::malformed(line_no, format!("invalid {what} '{token}'"))
    })
}

/// Parse one face corner token: `v`, `v/vt`, `v//vn` or `v/vt/vn`.
fn parse_corner(token: &str, line_no: usize) -> ConvertResult<Corner> {
    let mut split = token.split('/');
    let vertex = parse_index(split.next(), token, line_no)?.ok_or_else(|| {
        ConvertError::malformed(line_no, format!("face element '{token}' has no vertex index"))
    })?;
    let texcoord = parse_index(split.next(), token, line_no)?;
    let normal = parse_index(split.next(), token, line_no)?;

    if split.next().is_some() {
        return Err(ConvertError::malformed(
            line_no,
            format!("face element '{token}' has too many index slots"),
        ));
    }

    Ok(Corner {
        vertex,
        texcoord,
        normal,
    })
}

fn parse_index(
    slot: Option<&str>,
    token: &str,
    line_no: usize,
) -> ConvertResult<Option<usize>> {
    let Some(slot) = slot else {
        return Ok(None);
    };
    if slot.is_empty() {
        return Ok(None);
    }

    // 1-based only; negative (relative) indices are not supported.
    let index = slot.parse::<usize>().map_err(|_| {
        ConvertError::malformed(line_no, format!("invalid index '{slot}' in '{token}'"))
    })?;
    if index == 0 {
        return Err(ConvertError::malformed(
            line_no,
            format!("index 0 in '{token}', indices are 1-based"),
        ));
    }

    Ok(Some(index))
}
