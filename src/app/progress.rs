use super::*;
use crate::model::UserAnswers;
use crate::quiz;
use crate::storage::{Fact, material_key};

impl PlayerApp {
    /// Deriva la fase del material actual releyendo los hechos persistidos.
    /// Se llama cada vez que un material pasa a ser el actual; nunca hereda
    /// nada del material anterior.
    pub(crate) fn derive_phase(&mut self) {
        let material = self.current_material().clone();
        let id = material.id.as_str();

        let video_done = self.store.get_flag(&material_key(id, Fact::VideoCompleted));
        let quiz_done = self.store.get_flag(&material_key(id, Fact::QuizCompleted));
        let answers_raw = self.store.get(&material_key(id, Fact::QuizAnswers));
        let previous_score = self
            .store
            .get(&material_key(id, Fact::QuizScore))
            .and_then(|s| s.parse::<u32>().ok());

        self.session.selections = vec![None; material.questions.len()];
        self.session.previous_score = previous_score;
        self.session.score = None;
        self.session.review.clear();

        if quiz_done {
            match answers_raw.as_deref().map(parse_stored_answers) {
                Some(Ok(answers)) if answers.len() == material.questions.len() => {
                    self.session.phase = MaterialPhase::QuizCompleted;
                    self.session.score = Some(quiz::score(&answers, &material.answer_key));
                    self.session.review = quiz::review(&answers, &material);
                    return;
                }
                Some(Ok(answers)) => {
                    log::warn!(
                        "respuestas guardadas de {id} con longitud {} para {} preguntas",
                        answers.len(),
                        material.questions.len()
                    );
                }
                Some(Err(err)) => {
                    log::warn!("respuestas guardadas de {id} ilegibles: {err}");
                }
                None => {
                    // quiz_completed presente sin quiz_answers: los hechos se
                    // escriben por separado y pueden quedar incoherentes.
                    log::warn!("{id}: quiz_completed sin quiz_answers");
                }
            }
            // Degradación: se comporta como quiz pendiente, sin inventar nota.
            self.session.phase = MaterialPhase::QuizPending;
            return;
        }

        self.session.phase = if video_done {
            MaterialPhase::QuizPending
        } else {
            MaterialPhase::VideoPending
        };
    }
}

fn parse_stored_answers(raw: &str) -> Result<UserAnswers, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::embed::{EmbedEvent, PlaybackState, ScriptedHost};
    use crate::storage::{FactStore, MemoryBackend, RETENTION_DAYS};

    const DOC: &str = r#"
- id: "M1"
  title: "uno"
  description: "d"
  video_ref: "v1"
  questions:
    - text: "Q1"
      options: ["a", "b"]
  answer_key: ["A"]
- id: "M2"
  title: "dos"
  description: "d"
  video_ref: "v2"
  questions:
    - text: "Q1"
      options: ["x", "y"]
    - text: "Q2"
      options: ["x", "y", "z"]
  answer_key: ["B", "C"]
"#;

    fn test_app_on(backend: MemoryBackend) -> (PlayerApp, ScriptedHost) {
        let host = ScriptedHost::new();
        host.set_api_ready(true);
        let handle = host.handle();
        let catalog = Catalog::from_document(DOC).expect("catálogo de prueba");
        let app = PlayerApp::with_parts(catalog, FactStore::new(Box::new(backend)), Box::new(host));
        (app, handle)
    }

    fn test_app() -> (PlayerApp, MemoryBackend, ScriptedHost) {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        let (app, host_handle) = test_app_on(backend);
        (app, store_handle, host_handle)
    }

    #[test]
    fn fresh_material_starts_video_pending() {
        let (app, _store, _host) = test_app();
        assert_eq!(app.session.material_id, "M1");
        assert_eq!(app.session.phase, MaterialPhase::VideoPending);
    }

    #[test]
    fn video_end_transitions_once_and_writes_once() {
        let (mut app, store, host) = test_app();
        let key = material_key("M1", Fact::VideoCompleted);

        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        app.pump_embed_events();
        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        app.pump_embed_events();

        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
        assert!(app.session.video_completed_this_session);
        assert_eq!(store.write_count_for(&key), 1);
    }

    #[test]
    fn submit_then_reload_reconstructs_completed_state() {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        let (mut app, _host) = test_app_on(backend);

        app.marcar_video_visto();
        app.session.selections = vec![Some(crate::model::Letter::B)];
        app.procesar_envio();
        assert_eq!(app.session.phase, MaterialPhase::QuizCompleted);
        let review_before = app.session.review.clone();

        // "Recarga": una app nueva sobre el mismo almacén
        let (reloaded, _host) = test_app_on(store_handle);
        assert_eq!(reloaded.session.phase, MaterialPhase::QuizCompleted);
        assert_eq!(reloaded.session.review, review_before);
        assert_eq!(reloaded.session.score.map(|s| s.percentage), Some(0));
    }

    #[test]
    fn corrupt_stored_answers_degrade_to_quiz_pending() {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        {
            let mut store = FactStore::new(Box::new(store_handle.handle()));
            store.set(&material_key("M1", Fact::QuizCompleted), "true", RETENTION_DAYS);
            store.set(
                &material_key("M1", Fact::QuizAnswers),
                "esto no es json",
                RETENTION_DAYS,
            );
        }
        let (app, _host) = test_app_on(backend);
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
        assert!(app.session.score.is_none());
    }

    #[test]
    fn completed_without_answers_degrades_to_quiz_pending() {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        {
            let mut store = FactStore::new(Box::new(store_handle.handle()));
            store.set(&material_key("M1", Fact::QuizCompleted), "true", RETENTION_DAYS);
        }
        let (app, _host) = test_app_on(backend);
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
    }

    #[test]
    fn wrong_length_answers_degrade_to_quiz_pending() {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        {
            let mut store = FactStore::new(Box::new(store_handle.handle()));
            store.set(&material_key("M1", Fact::QuizCompleted), "true", RETENTION_DAYS);
            store.set(
                &material_key("M1", Fact::QuizAnswers),
                r#"["A","B"]"#,
                RETENTION_DAYS,
            );
        }
        let (app, _host) = test_app_on(backend);
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
    }

    #[test]
    fn expired_facts_read_as_fresh_material() {
        let (mut app, store, host) = test_app();
        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        app.pump_embed_events();
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);

        store.advance_days(RETENTION_DAYS + 1);
        app.derive_phase();
        assert_eq!(app.session.phase, MaterialPhase::VideoPending);
    }

    #[test]
    fn retake_shows_form_with_previous_score_until_next_submit() {
        let (mut app, _store, _host) = test_app();
        app.marcar_video_visto();
        app.session.selections = vec![Some(crate::model::Letter::A)];
        app.procesar_envio();
        assert_eq!(app.session.phase, MaterialPhase::QuizCompleted);

        app.rehacer_quiz();
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
        // El formulario vuelve limpio pero la nota anterior sigue visible
        assert_eq!(app.session.selections, vec![None]);
        assert_eq!(app.previous_score_banner(), Some(100));

        // Un nuevo envío la sobrescribe y apaga el banner
        app.session.selections = vec![Some(crate::model::Letter::B)];
        app.procesar_envio();
        assert_eq!(app.previous_score_banner(), None);
        assert_eq!(app.session.previous_score, Some(0));
    }

    #[test]
    fn retake_deletes_completion_but_keeps_score_fact() {
        let (mut app, store, _host) = test_app();
        app.marcar_video_visto();
        app.session.selections = vec![Some(crate::model::Letter::A)];
        app.procesar_envio();
        app.rehacer_quiz();

        assert!(!store.contains_raw(&material_key("M1", Fact::QuizCompleted)));
        assert!(!store.contains_raw(&material_key("M1", Fact::QuizAnswers)));
        assert!(store.contains_raw(&material_key("M1", Fact::QuizScore)));
    }

    #[test]
    fn incomplete_submission_blocks_without_state_change() {
        let (mut app, store, _host) = test_app();
        app.switch_material("M2");
        app.marcar_video_visto();

        app.session.selections = vec![Some(crate::model::Letter::A), None];
        app.procesar_envio();

        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
        assert!(!app.session.notice.is_empty());
        assert!(!store.contains_raw(&material_key("M2", Fact::QuizCompleted)));
    }
}
