//! C-header emission: formats converted OBJ/MTL arrays into `<base>OBJ.h`
//! and `<base>MTL.h` files ready for inclusion in an OpenGL ES project.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use asset::ConvertOutput;

/// Output file paths and array-name prefixes derived from the input paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNames {
    pub obj_header: PathBuf,
    pub mtl_header: PathBuf,
    /// Prefix for geometry array names, `<base>OBJ`.
    pub obj_prefix: String,
    /// Prefix for material array names, `<base>MTL`.
    pub mtl_prefix: String,
}

impl OutputNames {
    /// `model.obj` + `model.mtl` become `modelOBJ.h`/`modelMTL.h` next to
    /// their inputs, with `modelOBJ`/`modelMTL` as array-name prefixes.
    pub fn derive(obj_path: &Path, mtl_path: &Path) -> Self {
        let obj_base = stem(obj_path);
        let mtl_base = stem(mtl_path);
        Self {
            obj_header: obj_path.with_file_name(format!("{obj_base}OBJ.h")),
            mtl_header: mtl_path.with_file_name(format!("{mtl_base}MTL.h")),
            obj_prefix: format!("{obj_base}OBJ"),
            mtl_prefix: format!("{mtl_base}MTL"),
        }
    }
}

/// Render both headers and write them next to the input files.
pub fn write_headers(output: &ConvertOutput, names: &OutputNames) -> io::Result<()> {
    fs::write(&names.obj_header, geometry_header(output, &names.obj_prefix))?;
    log::info!("wrote {}", names.obj_header.display());
    fs::write(&names.mtl_header, material_header(output, &names.mtl_prefix))?;
    log::info!("wrote {}", names.mtl_header.display());
    Ok(())
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}

/// Render the geometry header: a provenance comment, the corner count
/// constant, and the flat position array, then normal and texcoord arrays
/// when the source declared any.
pub fn geometry_header(output: &ConvertOutput, prefix: &str) -> String {
    let geometry = &output.geometry;
    let stats = &output.stats;
    let mut header = String::new();

    header.push_str("// Created with mtl2gl\n\n");
    let _ = write!(
        header,
        "/*\nvertices: {}\nfaces: {}\nnormals: {}\ntexture coords: {}\n*/\n\n",
        stats.vertices, stats.faces, stats.normals, stats.texcoords
    );

    let _ = write!(
        header,
        "unsigned int {prefix}NumVerts = {};\n\n",
        geometry.corner_count
    );

    float_array(&mut header, prefix, "Verts", &geometry.positions, 3);
    if stats.normals > 0 {
        float_array(&mut header, prefix, "Normals", &geometry.normals, 3);
    }
    if stats.texcoords > 0 {
        float_array(&mut header, prefix, "TexCoords", &geometry.texcoords, 2);
    }

    header
}

/// Render the material header: count, color/exponent arrays and the
/// texture filename table, all in declaration order.
pub fn material_header(output: &ConvertOutput, prefix: &str) -> String {
    let materials = &output.materials;
    let count = materials.material_count();
    let mut header = String::new();

    header.push_str("// Created with mtl2gl\n\n");
    let _ = write!(header, "/*\nmaterials: {count}\n");
    for name in &materials.names {
        let _ = write!(header, "  {name}\n");
    }
    header.push_str("*/\n\n");

    let _ = write!(header, "int {prefix}NumMaterials = {count};\n\n");

    color_table(&mut header, prefix, "Ambient", &materials.ambient, count);
    color_table(&mut header, prefix, "Diffuse", &materials.diffuse, count);
    color_table(&mut header, prefix, "Specular", &materials.specular, count);

    let _ = write!(header, "float {prefix}Exponent [{count}] = {{\n");
    for value in &materials.exponent {
        let _ = write!(header, "{value:.3},\n");
    }
    header.push_str("};\n\n");

    let _ = write!(header, "const char *{prefix}Textures [{count}] = {{\n");
    for texture in &materials.textures {
        match texture {
            Some(filename) => {
                let _ = write!(header, "\"{filename}\",\n");
            }
            None => header.push_str("NULL,\n"),
        }
    }
    header.push_str("};\n\n");

    header
}

/// `float <prefix><name> [] = { ... };` with `stride` values per line.
fn float_array(header: &mut String, prefix: &str, name: &str, values: &[f32], stride: usize) {
    let _ = write!(header, "float {prefix}{name} [] = {{\n");
    for row in values.chunks(stride) {
        let mut first = true;
        for value in row {
            if !first {
                header.push(',');
            }
            let _ = write!(header, "{value:.3}");
            first = false;
        }
        header.push_str(",\n");
    }
    header.push_str("};\n\n");
}

fn color_table(header: &mut String, prefix: &str, name: &str, values: &[f32], count: usize) {
    let _ = write!(header, "float {prefix}{name} [{count}][3] = {{\n");
    for rgb in values.chunks(3) {
        let _ = write!(header, "{:.3},{:.3},{:.3},\n", rgb[0], rgb[1], rgb[2]);
    }
    header.push_str("};\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::{Config, convert};

    const OBJ: &str = "\
v 0.0 0.0 0.0
v 2.0 0.0 0.0
v 0.0 2.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";

    const MTL: &str = "\
newmtl red
Ka 0.1 0.1 0.1
Kd 1 0 0
map_Kd red.png
newmtl flat
Kd 0 1 0
";

    #[test]
    fn derives_sibling_header_paths() {
        let names = OutputNames::derive(Path::new("assets/cube.obj"), Path::new("assets/cube.mtl"));
        assert_eq!(names.obj_header, Path::new("assets/cubeOBJ.h"));
        assert_eq!(names.mtl_header, Path::new("assets/cubeMTL.h"));
        assert_eq!(names.obj_prefix, "cubeOBJ");
        assert_eq!(names.mtl_prefix, "cubeMTL");
    }

    #[test]
    fn geometry_header_has_count_and_arrays() {
        let output = convert(OBJ, MTL, &Config::default()).expect("convert");
        let header = geometry_header(&output, "cubeOBJ");
        assert!(header.contains("unsigned int cubeOBJNumVerts = 3;"));
        assert!(header.contains("float cubeOBJVerts [] = {"));
        assert!(header.contains("float cubeOBJNormals [] = {"));
        assert!(header.contains("float cubeOBJTexCoords [] = {"));
        assert!(header.contains("-0.500,-0.500,0.000,"));
    }

    #[test]
    fn geometry_header_omits_absent_attribute_arrays() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let output = convert(obj, "", &Config::default()).expect("convert");
        let header = geometry_header(&output, "triOBJ");
        assert!(header.contains("float triOBJVerts [] = {"));
        assert!(!header.contains("Normals"));
        assert!(!header.contains("TexCoords"));
    }

    #[test]
    fn material_header_lists_all_tables() {
        let output = convert(OBJ, MTL, &Config::default()).expect("convert");
        let header = material_header(&output, "cubeMTL");
        assert!(header.contains("int cubeMTLNumMaterials = 2;"));
        assert!(header.contains("float cubeMTLAmbient [2][3] = {"));
        assert!(header.contains("float cubeMTLDiffuse [2][3] = {"));
        assert!(header.contains("float cubeMTLSpecular [2][3] = {"));
        assert!(header.contains("float cubeMTLExponent [2] = {"));
        assert!(header.contains("\"red.png\",\nNULL,"));
    }
}
