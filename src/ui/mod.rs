pub mod layout;
pub mod views;

use crate::app::PlayerApp;
use eframe::{App, Frame};
use egui::Context;
use layout::{side_drawer, top_panel};

impl App for PlayerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Notificaciones externas primero: API global listo, instancia lista,
        // cambios de estado de reproducción.
        self.pump_embed_events();

        top_panel(self, ctx);

        // PANEL LATERAL DE MATERIALES (solo si está abierto)
        if self.sidebar_open {
            side_drawer(self, ctx);
        }

        views::material::ui_material(self, ctx);

        // El embed externo no despierta a egui por sí solo: repintar de vez
        // en cuando para que la bomba de eventos siga drenando.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
