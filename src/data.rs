// src/data.rs

use crate::model::Material;
use std::collections::HashSet;
use std::fmt;

/// El documento de materiales no sirve: ausente, vacío o malformado.
/// Fatal: sin catálogo no se renderiza nada.
#[derive(Debug)]
pub enum CatalogError {
    Unavailable(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Unavailable(reason) => {
                write!(f, "Catálogo de materiales no disponible: {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Carga la lista de materiales desde el YAML embebido
pub fn read_materials_embedded() -> Result<Vec<Material>, CatalogError> {
    // Ajusta la ruta si pones tu yaml en otra carpeta
    parse_materials(include_str!("data/materials.yaml"))
}

/// Parsea y valida el documento de materiales. El documento es entrada
/// externa: cualquier violación del esquema se trata como no disponible.
pub fn parse_materials(doc: &str) -> Result<Vec<Material>, CatalogError> {
    if doc.trim().is_empty() {
        return Err(CatalogError::Unavailable("documento vacío".into()));
    }

    let materials: Vec<Material> = serde_yaml::from_str(doc)
        .map_err(|err| CatalogError::Unavailable(format!("YAML inválido: {err}")))?;

    if materials.is_empty() {
        return Err(CatalogError::Unavailable(
            "el documento no contiene materiales".into(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for material in &materials {
        if !seen_ids.insert(material.id.as_str()) {
            return Err(CatalogError::Unavailable(format!(
                "id de material duplicado: {}",
                material.id
            )));
        }
        validate_material(material)?;
    }

    Ok(materials)
}

fn validate_material(material: &Material) -> Result<(), CatalogError> {
    if material.questions.is_empty() {
        return Err(CatalogError::Unavailable(format!(
            "material {} sin preguntas",
            material.id
        )));
    }
    if material.answer_key.len() != material.questions.len() {
        return Err(CatalogError::Unavailable(format!(
            "material {}: answer_key con {} entradas para {} preguntas",
            material.id,
            material.answer_key.len(),
            material.questions.len()
        )));
    }
    for (idx, question) in material.questions.iter().enumerate() {
        let n_options = question.options.len();
        if !(2..=5).contains(&n_options) {
            return Err(CatalogError::Unavailable(format!(
                "material {}, pregunta {}: {} opciones (se esperan 2-5)",
                material.id,
                idx + 1,
                n_options
            )));
        }
        let key = material.answer_key[idx];
        if key.index() >= n_options {
            return Err(CatalogError::Unavailable(format!(
                "material {}, pregunta {}: la clave {} no apunta a ninguna opción",
                material.id,
                idx + 1,
                key
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Letter;

    #[test]
    fn embedded_document_parses() {
        let materials = read_materials_embedded().expect("documento embebido válido");
        assert!(!materials.is_empty());
    }

    #[test]
    fn empty_document_is_unavailable() {
        assert!(parse_materials("").is_err());
        assert!(parse_materials("   \n  ").is_err());
    }

    #[test]
    fn non_sequence_document_is_unavailable() {
        assert!(parse_materials("clave: valor").is_err());
    }

    #[test]
    fn zero_entries_is_unavailable() {
        assert!(parse_materials("[]").is_err());
    }

    #[test]
    fn mismatched_answer_key_is_unavailable() {
        let doc = r#"
- id: "M1"
  title: "t"
  description: "d"
  video_ref: "v"
  questions:
    - text: "q"
      options: ["a", "b"]
  answer_key: ["A", "B"]
"#;
        assert!(parse_materials(doc).is_err());
    }

    #[test]
    fn answer_key_must_point_to_an_option() {
        let doc = r#"
- id: "M1"
  title: "t"
  description: "d"
  video_ref: "v"
  questions:
    - text: "q"
      options: ["a", "b"]
  answer_key: ["E"]
"#;
        assert!(parse_materials(doc).is_err());
    }

    #[test]
    fn valid_document_parses_letters_by_position() {
        let doc = r#"
- id: "M1"
  title: "t"
  description: "d"
  video_ref: "v"
  questions:
    - text: "q"
      options: ["a", "b", "c"]
  answer_key: ["C"]
"#;
        let materials = parse_materials(doc).expect("documento válido");
        assert_eq!(materials[0].answer_key[0], Letter::C);
    }
}
