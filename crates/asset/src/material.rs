//! Material serialization: per-material flat arrays in declaration order.

use crate::mtl::MaterialLib;

/// Flattened material table. Color arrays hold three floats per material,
/// `exponent` one; `textures` and `names` run parallel to them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatMaterials {
    pub ambient: Vec<f32>,
    pub diffuse: Vec<f32>,
    pub specular: Vec<f32>,
    pub exponent: Vec<f32>,
    pub textures: Vec<Option<String>>,
    pub names: Vec<String>,
}

impl FlatMaterials {
    pub fn material_count(&self) -> usize {
        self.names.len()
    }
}

/// Serialize the merged material records. The texture column reflects only
/// whether `map_Kd` appeared in a material's block, independent of where the
/// color component lines sat relative to it.
pub fn flatten_materials(lib: &MaterialLib) -> FlatMaterials {
    let mut flat = FlatMaterials::default();
    for material in lib.iter() {
        flat.ambient.extend_from_slice(&material.ambient);
        flat.diffuse.extend_from_slice(&material.diffuse);
        flat.specular.extend_from_slice(&material.specular);
        flat.exponent.push(material.exponent);
        flat.textures.push(material.texture.clone());
        flat.names.push(material.name.clone());
    }
    flat
}
