//! Geometric normalization: centering and uniform scaling of vertex
//! positions so the mesh sits at the origin with a longest side of 1 unit.

use crate::error::{ConvertError, ConvertResult};

/// Per-axis min/max over a vertex set. Derived, never stored past
/// normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Extent {
    /// None for an empty vertex set.
    pub fn of(vertices: &[[f32; 3]]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let mut extent = Extent {
            min: *first,
            max: *first,
        };
        for vertex in rest {
            for axis in 0..3 {
                extent.min[axis] = extent.min[axis].min(vertex[axis]);
                extent.max[axis] = extent.max[axis].max(vertex[axis]);
            }
        }
        Some(extent)
    }

    /// Average of min and max per axis.
    pub fn midpoint(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Largest side of the bounding box.
    pub fn largest_dimension(&self) -> f32 {
        (0..3)
            .map(|axis| self.max[axis] - self.min[axis])
            .fold(0.0, f32::max)
    }
}

/// Normalizer configuration. `origin` overrides automatic centering,
/// `explicit_scale` overrides the automatic 1/longest-side factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizeOptions {
    pub center: bool,
    pub scale: bool,
    pub explicit_scale: Option<f32>,
    pub origin: Option<[f32; 3]>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            center: true,
            scale: true,
            explicit_scale: None,
            origin: None,
        }
    }
}

/// Translate then scale every vertex in place. The translation always runs
/// before the scale so the extent feeding the automatic factor is the
/// centered one.
pub fn normalize(vertices: &mut [[f32; 3]], options: &NormalizeOptions) -> ConvertResult<()> {
    let Some(extent) = Extent::of(vertices) else {
        return Ok(());
    };

    let translation = if let Some(origin) = options.origin {
        Some(origin)
    } else if options.center {
        Some(extent.midpoint())
    } else {
        None
    };

    if let Some(origin) = translation {
        for vertex in vertices.iter_mut() {
            for axis in 0..3 {
                vertex[axis] -= origin[axis];
            }
        }
        log::debug!(
            "translated {} vertices by -({}, {}, {})",
            vertices.len(),
            origin[0],
            origin[1],
            origin[2]
        );
    }

    let factor = if let Some(factor) = options.explicit_scale {
        Some(factor)
    } else if options.scale {
        // Translation does not change the extent's size, only its position.
        let largest = extent.largest_dimension();
        if largest == 0.0 {
            return Err(ConvertError::DegenerateGeometry);
        }
        Some(1.0 / largest)
    } else {
        None
    };

    if let Some(factor) = factor {
        for vertex in vertices.iter_mut() {
            for axis in 0..3 {
                vertex[axis] *= factor;
            }
        }
        log::debug!("scaled {} vertices by {}", vertices.len(), factor);
    }

    Ok(())
}
