use crate::app::PlayerApp;
use crate::model::Material;
use egui::{Margin, RichText, Ui};

/// Resultados: nota sobre 100, desglose y revisión pregunta a pregunta,
/// calculados a partir de las respuestas guardadas.
pub fn ui_results(app: &mut PlayerApp, ui: &mut Ui, material: &Material) {
    ui.heading("Resultados del cuestionario");
    ui.label(format!("Material: {}: {}", material.id, material.title));
    ui.add_space(6.0);

    if let Some(score) = app.session.score {
        ui.heading(format!("Nota: {} / 100", score.percentage));
        ui.label(format!(
            "Correctas: {} • Falladas: {} • Total: {}",
            score.correct, score.wrong, score.total
        ));
    }

    ui.add_space(10.0);
    ui.label(RichText::new("Revisión de respuestas").strong());
    ui.add_space(6.0);

    let rows = app.session.review.clone();
    for row in &rows {
        egui::Frame::default()
            .fill(ui.visuals().faint_bg_color)
            .inner_margin(Margin::symmetric(10, 8))
            .show(ui, |ui| {
                let status = if row.is_correct {
                    "✓ Correcta"
                } else {
                    "✗ Incorrecta"
                };
                ui.label(RichText::new(format!("Pregunta {}: {}", row.number, status)).strong());
                ui.label(&row.question);
                match row.your_answer {
                    Some(letter) => ui.label(format!("Tu respuesta: {letter}")),
                    None => ui.label("Tu respuesta: sin responder"),
                };
                if !row.is_correct {
                    ui.label(format!("Respuesta correcta: {}", row.correct));
                }
                ui.label(format!("{}. {}", row.correct, row.correct_text));
            });
        ui.add_space(6.0);
    }

    ui.add_space(8.0);
    if ui.button("🔄 Rehacer cuestionario").clicked() {
        app.rehacer_quiz();
    }
}
