use super::*;
use crate::quiz;
use crate::storage::{Fact, RETENTION_DAYS, material_key};

impl PlayerApp {
    /// Fin de reproducción: transición VideoPending -> QuizPending.
    /// Idempotente: una segunda notificación con el vídeo ya completado
    /// es un no-op, sin escritura adicional.
    pub fn marcar_video_visto(&mut self) {
        if self.session.phase != MaterialPhase::VideoPending {
            return;
        }
        let key = material_key(&self.session.material_id, Fact::VideoCompleted);
        self.store.set(&key, "true", RETENTION_DAYS);
        self.session.video_completed_this_session = true;
        self.session.phase = MaterialPhase::QuizPending;
    }

    /// Envío del cuestionario. Con preguntas sin responder no se persiste
    /// nada: solo un aviso en línea.
    pub fn procesar_envio(&mut self) {
        let material = self.current_material().clone();
        let answers = self.session.selections.clone();

        if let Err(err) = quiz::validate(&answers, material.questions.len()) {
            self.session.notice = err.to_string();
            return;
        }

        let id = material.id.as_str();
        match serde_json::to_string(&answers) {
            Ok(json) => {
                self.store
                    .set(&material_key(id, Fact::QuizAnswers), &json, RETENTION_DAYS);
            }
            Err(err) => {
                log::warn!("no se pudieron serializar las respuestas de {id}: {err}");
                return;
            }
        }
        self.store
            .set(&material_key(id, Fact::QuizCompleted), "true", RETENTION_DAYS);

        let result = quiz::score(&answers, &material.answer_key);
        self.store.set(
            &material_key(id, Fact::QuizScore),
            &result.percentage.to_string(),
            RETENTION_DAYS,
        );

        self.session.quiz_submitted_this_session = true;
        self.session.notice.clear();
        self.session.phase = MaterialPhase::QuizCompleted;
        self.session.previous_score = Some(result.percentage);
        self.session.score = Some(result);
        self.session.review = quiz::review(&answers, &material);
    }

    /// Rehacer el cuestionario: borra quiz_completed y quiz_answers.
    /// La nota se deja en el almacén a propósito y se sigue mostrando como
    /// "nota anterior" hasta que el siguiente envío la sobrescriba.
    pub fn rehacer_quiz(&mut self) {
        let id = self.session.material_id.clone();
        self.store.delete(&material_key(&id, Fact::QuizCompleted));
        self.store.delete(&material_key(&id, Fact::QuizAnswers));

        // Limpia solo la selección de la sesión, no el catálogo
        let n_questions = self.current_material().questions.len();
        self.session.selections = vec![None; n_questions];
        self.session.review.clear();
        self.session.score = None;
        self.session.quiz_submitted_this_session = false;
        self.session.notice.clear();
        self.session.phase = MaterialPhase::QuizPending;
    }
}
