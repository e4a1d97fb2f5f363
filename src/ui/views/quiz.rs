use crate::app::PlayerApp;
use crate::model::{Letter, Material};
use egui::{Button, Color32, RichText, Ui};

/// Formulario del cuestionario: una pregunta por bloque, radios A..E,
/// banner de nota anterior y botón de envío.
pub fn ui_quiz_form(app: &mut PlayerApp, ui: &mut Ui, material: &Material) {
    ui.heading("Cuestionario");

    if let Some(score) = app.previous_score_banner() {
        ui.label(
            RichText::new(format!("Nota anterior: {score} / 100"))
                .color(ui.visuals().weak_text_color()),
        );
    }
    ui.add_space(8.0);

    // Guarda: la selección siempre alineada con las preguntas
    if app.session.selections.len() != material.questions.len() {
        app.session.selections = vec![None; material.questions.len()];
    }

    for (qi, question) in material.questions.iter().enumerate() {
        ui.label(RichText::new(format!("{}. {}", qi + 1, question.text)).strong());
        for (oi, option) in question.options.iter().enumerate() {
            if let Some(letter) = Letter::from_index(oi) {
                ui.radio_value(
                    &mut app.session.selections[qi],
                    Some(letter),
                    format!("{letter}. {option}"),
                );
            }
        }
        ui.add_space(10.0);
    }

    if ui.add_sized([160.0, 36.0], Button::new("Enviar")).clicked() {
        app.procesar_envio();
    }

    if !app.session.notice.is_empty() {
        ui.add_space(6.0);
        ui.colored_label(Color32::from_rgb(220, 80, 80), &app.session.notice);
    }
}
