use crate::app::PlayerApp;
use egui::{Button, Context, Ui, Vec2};

pub fn top_panel(app: &mut PlayerApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            let label = if app.sidebar_open {
                "✖ Cerrar materiales"
            } else {
                "☰ Materiales"
            };
            if ui.button(label).clicked() {
                if app.sidebar_open {
                    app.cerrar_menu_lateral();
                } else {
                    app.abrir_menu_lateral();
                }
            }
            ui.separator();
            ui.label("Reproductor de módulos");
        });
    });
}

/// Panel lateral con la lista de materiales y su marca de completado.
pub fn side_drawer(app: &mut PlayerApp, ctx: &Context) {
    egui::SidePanel::left("sidebar")
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Materiales");
            ui.add_space(8.0);

            let infos = app.material_infos();
            let mut clicked: Option<String> = None;
            for info in &infos {
                let mut label = info.label();
                if info.active {
                    label = format!("▶ {label}");
                }
                if big_list_button(ui, label, ui.available_width(), 32.0, true) {
                    clicked = Some(info.id.clone());
                }
                ui.add_space(4.0);
            }
            // Fuera del bucle: switch_material vuelve a leer material_infos
            if let Some(id) = clicked {
                app.switch_material(&id);
            }
        });
}

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}
