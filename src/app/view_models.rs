use super::*;
use crate::storage::{Fact, material_key};

impl PlayerApp {
    /// Filas del panel lateral: un material por fila, con su marca de
    /// completado (hecho quiz_completed) y si es el activo.
    pub fn material_infos(&self) -> Vec<MaterialInfo> {
        self.catalog
            .materials()
            .iter()
            .enumerate()
            .map(|(idx, material)| MaterialInfo {
                idx,
                id: material.id.clone(),
                title: material.title.clone(),
                completed: self
                    .store
                    .get_flag(&material_key(&material.id, Fact::QuizCompleted)),
                active: material.id == self.session.material_id,
            })
            .collect()
    }

    /// Nota anterior a mostrar sobre el formulario, si existe y aún no se
    /// ha enviado nada en esta sesión.
    pub fn previous_score_banner(&self) -> Option<u32> {
        if self.session.quiz_submitted_this_session {
            None
        } else {
            self.session.previous_score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::embed::ScriptedHost;
    use crate::storage::{FactStore, MemoryBackend};

    const DOC: &str = r#"
- id: "A"
  title: "a"
  description: "d"
  video_ref: "va"
  questions:
    - text: "q"
      options: ["x", "y"]
  answer_key: ["A"]
- id: "B"
  title: "b"
  description: "d"
  video_ref: "vb"
  questions:
    - text: "q"
      options: ["x", "y"]
  answer_key: ["B"]
"#;

    #[test]
    fn sidebar_rows_track_completion_and_active_material() {
        let host = ScriptedHost::new();
        host.set_api_ready(true);
        let catalog = Catalog::from_document(DOC).expect("catálogo de prueba");
        let mut app = PlayerApp::with_parts(
            catalog,
            FactStore::new(Box::new(MemoryBackend::new())),
            Box::new(host),
        );

        app.marcar_video_visto();
        app.session.selections = vec![Some(crate::model::Letter::A)];
        app.procesar_envio();

        let infos = app.material_infos();
        assert_eq!(infos.len(), 2);
        assert!(infos[0].completed);
        assert!(infos[0].active);
        assert!(!infos[1].completed);
        assert!(!infos[1].active);
    }
}
