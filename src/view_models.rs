// src/view_models.rs

/// Fila del panel lateral de materiales.
#[derive(Clone, Debug)]
pub struct MaterialInfo {
    pub idx: usize, // índice 0-based en el catálogo
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub active: bool,
}

impl MaterialInfo {
    pub fn label(&self) -> String {
        if self.completed {
            format!("✔ {}: {}", self.id, self.title)
        } else {
            format!("{}: {}", self.id, self.title)
        }
    }
}
