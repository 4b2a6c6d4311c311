//! OBJ/MTL conversion core: parse loosely-structured geometry and material
//! text, normalize vertex positions, and flatten everything into
//! render-order float arrays. File I/O and output formatting live with the
//! callers; this crate only ever sees complete text contents.

pub mod error;
pub mod flatten;
pub mod material;
pub mod mtl;
pub mod normalize;
pub mod obj;

pub use error::{ConvertError, ConvertResult, IndexKind};
pub use flatten::{FlatGeometry, FlattenOptions};
pub use material::FlatMaterials;
pub use mtl::{Material, MaterialLib};
pub use normalize::{Extent, NormalizeOptions};
pub use obj::{Corner, Face, Geometry};

/// Pipeline configuration. The CLI resolves its `--no-move`/`--no-scale`
/// switches into `center`/`scale` before handing this over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub center: bool,
    pub scale: bool,
    pub explicit_scale: Option<f32>,
    pub origin: Option<[f32; 3]>,
    pub strict: bool,
    pub flip_v: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center: true,
            scale: true,
            explicit_scale: None,
            origin: None,
            strict: false,
            flip_v: false,
        }
    }
}

/// Everything a renderer needs from one OBJ/MTL pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertOutput {
    pub geometry: FlatGeometry,
    pub materials: FlatMaterials,
    /// Counts from the source files, kept for output provenance headers.
    pub stats: SourceStats,
}

/// Record counts observed while parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub vertices: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub faces: usize,
    pub materials: usize,
}

/// Run the full pipeline: parse both files, normalize vertex positions,
/// fan-triangulate and resolve faces, serialize materials. Fails fast on
/// the first malformed record.
pub fn convert(
    obj_contents: &str,
    mtl_contents: &str,
    config: &Config,
) -> ConvertResult<ConvertOutput> {
    let mut geometry = obj::parse_obj(obj_contents)?;
    let materials = mtl::parse_mtl(mtl_contents)?;

    let stats = SourceStats {
        vertices: geometry.vertices.len(),
        texcoords: geometry.texcoords.len(),
        normals: geometry.normals.len(),
        faces: geometry.faces.len(),
        materials: materials.len(),
    };
    log::debug!(
        "parsed {} vertices, {} texcoords, {} normals, {} faces, {} materials",
        stats.vertices,
        stats.texcoords,
        stats.normals,
        stats.faces,
        stats.materials
    );

    let options = NormalizeOptions {
        center: config.center,
        scale: config.scale,
        explicit_scale: config.explicit_scale,
        origin: config.origin,
    };
    normalize::normalize(&mut geometry.vertices, &options)?;

    let flat_geometry = flatten::flatten(
        &geometry,
        &FlattenOptions {
            strict: config.strict,
            flip_v: config.flip_v,
        },
    )?;
    log::debug!(
        "flattened into {} triangle corners",
        flat_geometry.corner_count
    );

    let flat_materials = material::flatten_materials(&materials);

    Ok(ConvertOutput {
        geometry: flat_geometry,
        materials: flat_materials,
        stats,
    })
}
