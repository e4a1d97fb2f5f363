// src/catalog.rs

use crate::data::{CatalogError, parse_materials, read_materials_embedded};
use crate::model::Material;

/// Catálogo de materiales: lista ordenada, de solo lectura tras la carga.
/// Nunca está vacío (la carga falla antes).
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub fn load_embedded() -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            materials: read_materials_embedded()?,
        })
    }

    pub fn from_document(doc: &str) -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            materials: parse_materials(doc)?,
        })
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn first(&self) -> &Material {
        &self.materials[0]
    }

    /// Material inicial: prioridad id de la URL, luego último visitado,
    /// luego el primero del catálogo. Si el id resuelto no existe, se vuelve
    /// al primer material.
    pub fn resolve_initial(
        &self,
        url_id: Option<&str>,
        last_visited_id: Option<&str>,
    ) -> &Material {
        let resolved = url_id.or(last_visited_id);
        match resolved {
            Some(id) => self.find_by_id(id).unwrap_or_else(|| self.first()),
            None => self.first(),
        }
    }
}
