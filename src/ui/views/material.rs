use crate::app::PlayerApp;
use crate::model::MaterialPhase;
use egui::{Align2, CentralPanel, Context, CornerRadius, ScrollArea, Sense, vec2};

/// Panel principal: cabecera del material, estado del vídeo, hueco del
/// reproductor y, según la fase, el formulario o los resultados.
pub fn ui_material(app: &mut PlayerApp, ctx: &Context) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            let material = app.current_material().clone();
            let max_width = 680.0;
            let panel_width = (ui.available_width() * 0.97).min(max_width);

            ui.vertical_centered(|ui| {
                ui.set_max_width(panel_width);

                ui.add_space(8.0);
                ui.heading(format!("{}: {}", material.id, material.title));
                ui.add_space(4.0);
                ui.label(&material.description);
                ui.add_space(10.0);

                // Estado del vídeo
                let video_done = app.session.phase != MaterialPhase::VideoPending;
                let status = if video_done {
                    "✅ ¡Vídeo visto!"
                } else {
                    "⏳ Vídeo pendiente de ver"
                };
                ui.label(status);
                ui.add_space(8.0);

                // Punto de montaje del widget externo (contenedor "player"):
                // se reserva el hueco 16:9 y el reproductor real lo superpone
                // la página anfitriona.
                let width = panel_width.min(640.0);
                let (rect, _) = ui.allocate_exact_size(vec2(width, width * 9.0 / 16.0), Sense::hover());
                ui.painter()
                    .rect_filled(rect, CornerRadius::same(4), ui.visuals().extreme_bg_color);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format!("🎬 {}", material.video_ref),
                    egui::TextStyle::Body.resolve(ui.style()),
                    ui.visuals().weak_text_color(),
                );

                #[cfg(not(target_arch = "wasm32"))]
                if app.session.phase == MaterialPhase::VideoPending {
                    ui.add_space(6.0);
                    if ui.button("⚡ Marcar vídeo como visto (TEST)").clicked() {
                        app.marcar_video_visto();
                    }
                }

                ui.add_space(14.0);

                match app.session.phase {
                    // Cuestionario oculto hasta terminar el vídeo
                    MaterialPhase::VideoPending => {}
                    MaterialPhase::QuizPending => super::quiz::ui_quiz_form(app, ui, &material),
                    MaterialPhase::QuizCompleted => super::results::ui_results(app, ui, &material),
                }

                ui.add_space(16.0);
            });
        });
    });
}
