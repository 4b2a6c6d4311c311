//! MTL material parser: `newmtl` blocks with Ka/Kd/Ks/Ns components and an
//! optional `map_Kd` texture reference.

use std::collections::HashMap;

use crate::error::{ConvertError, ConvertResult};

/// One named material. Components default to black with exponent 1.0 until
/// the corresponding lines are seen.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub exponent: f32,
    pub texture: Option<String>,
}

impl Material {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            exponent: 1.0,
            texture: None,
        }
    }
}

/// Materials in first-declaration order, addressable by name.
///
/// Component lines are merged into the record for the current material name,
/// so the result never depends on the order of `Ka`/`Kd`/`Ks`/`Ns`/`map_Kd`
/// lines within a block, and a repeated `newmtl` re-opens the same record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialLib {
    materials: Vec<Material>,
    by_name: HashMap<String, usize>,
}

impl MaterialLib {
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.by_name.get(name).map(|&slot| &self.materials[slot])
    }

    /// Materials in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    fn open(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.by_name.get(name) {
            return slot;
        }
        let slot = self.materials.len();
        self.materials.push(Material::new(name));
        self.by_name.insert(name.to_string(), slot);
        slot
    }
}

/// Parse complete MTL file contents.
pub fn parse_mtl(contents: &str) -> ConvertResult<MaterialLib> {
    let mut lib = MaterialLib::default();
    let mut current: Option<usize> = None;

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

        if tag == "newmtl" {
            let name = parts.next().ok_or_else(|| {
                ConvertError::malformed(line_no, "newmtl without a material name")
            })?;
            current = Some(lib.open(name));
            continue;
        }

        // Component lines outside any block have nothing to attach to.
        let Some(slot) = current else {
            continue;
        };
        let material = &mut lib.materials[slot];

        match tag {
            "Ka" => material.ambient = parse_rgb(&mut parts, line_no, "Ka")?,
            "Kd" => material.diffuse = parse_rgb(&mut parts, line_no, "Kd")?,
            "Ks" => material.specular = parse_rgb(&mut parts, line_no, "Ks")?,
            "Ns" => {
                let token = parts.next().ok_or_else(|| {
                    ConvertError::malformed(line_no, "Ns without an exponent value")
                })?;
                material.exponent = token.parse::<f32>().map_err(|_| {
                    ConvertError::malformed(line_no, format!("invalid Ns value '{token}'"))
                })?;
            }
            "map_Kd" => {
                let filename = parts.next().ok_or_else(|| {
                    ConvertError::malformed(line_no, "map_Kd without a filename")
                })?;
                material.texture = Some(filename.to_string());
            }
            _ => {}
        }
    }

    Ok(lib)
}

fn parse_rgb<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    what: &str,
) -> ConvertResult<[f32; 3]> {
    let mut rgb = [0.0f32; 3];
    for (slot, channel) in rgb.iter_mut().zip(["r", "g", "b"]) {
        let token = parts.next().ok_or_else(|| {
            ConvertError::malformed(line_no, format!("{what} is missing its {channel} channel"))
        })?;
        *slot = token.parse::<f32>().map_err(|_| {
            ConvertError::malformed(line_no, format!("invalid {what} {channel} value '{token}'"))
        })?;
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_block() {
        let src = "\
newmtl shiny
Ka 0.1 0.1 0.1
Kd 0.8 0.2 0.2
Ks 1.0 1.0 1.0
Ns 96.0
map_Kd shiny.png
";
        let lib = parse_mtl(src).expect("parse mtl");
        assert_eq!(lib.len(), 1);
        let material = lib.get("shiny").expect("material present");
        assert_eq!(material.ambient, [0.1, 0.1, 0.1]);
        assert_eq!(material.diffuse, [0.8, 0.2, 0.2]);
        assert_eq!(material.specular, [1.0, 1.0, 1.0]);
        assert_eq!(material.exponent, 96.0);
        assert_eq!(material.texture.as_deref(), Some("shiny.png"));
    }

    #[test]
    fn defaults_for_absent_components() {
        let lib = parse_mtl("newmtl bare\n").expect("parse");
        let material = lib.get("bare").expect("material present");
        assert_eq!(material.ambient, [0.0; 3]);
        assert_eq!(material.exponent, 1.0);
        assert_eq!(material.texture, None);
    }

    #[test]
    fn component_order_does_not_matter() {
        let lines = [
            "Ka 0.1 0.2 0.3",
            "Kd 1 0 0",
            "Ks 0.5 0.5 0.5",
            "Ns 32",
            "map_Kd tex.png",
        ];
        // A handful of permutations, including texture-first and texture-last.
        let orders: [[usize; 5]; 4] = [
            [0, 1, 2, 3, 4],
            [4, 0, 1, 2, 3],
            [1, 4, 3, 0, 2],
            [3, 2, 4, 1, 0],
        ];
        let mut parsed = Vec::new();
        for order in orders {
            let mut src = String::from("newmtl M\n");
            for &i in &order {
                src.push_str(lines[i]);
                src.push('\n');
            }
            let lib = parse_mtl(&src).expect("parse permutation");
            parsed.push(lib.get("M").expect("material present").clone());
        }
        for material in &parsed[1..] {
            assert_eq!(material, &parsed[0]);
        }
    }

    #[test]
    fn texture_before_diffuse_equals_after() {
        let a = parse_mtl("newmtl M\nmap_Kd tex.png\nKd 1 0 0\n").unwrap();
        let b = parse_mtl("newmtl M\nKd 1 0 0\nmap_Kd tex.png\n").unwrap();
        let a = a.get("M").unwrap();
        let b = b.get("M").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(a.texture.as_deref(), Some("tex.png"));
    }

    #[test]
    fn declaration_order_preserved() {
        let src = "newmtl b\nnewmtl a\nnewmtl c\n";
        let lib = parse_mtl(src).expect("parse");
        let names: Vec<&str> = lib.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn repeated_newmtl_merges_by_name() {
        let src = "newmtl M\nKd 1 0 0\nnewmtl other\nnewmtl M\nKs 0 1 0\n";
        let lib = parse_mtl(src).expect("parse");
        assert_eq!(lib.len(), 2);
        let material = lib.get("M").expect("material present");
        assert_eq!(material.diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(material.specular, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn last_write_wins_per_field() {
        let src = "newmtl M\nKd 1 0 0\nKd 0 0 1\n";
        let lib = parse_mtl(src).expect("parse");
        assert_eq!(lib.get("M").unwrap().diffuse, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn short_component_line_is_malformed() {
        let err = parse_mtl("newmtl M\nKa 0.1 0.2\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn bare_newmtl_is_malformed() {
        let err = parse_mtl("newmtl\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRecord { line: 1, .. }));
    }
}
