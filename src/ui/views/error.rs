use eframe::{App, Frame};
use egui::{CentralPanel, Context};

/// Pantalla fatal: el catálogo de materiales no está disponible.
/// No se renderiza nada más.
pub struct FatalApp {
    message: String,
}

impl FatalApp {
    pub fn new(message: String) -> Self {
        FatalApp { message }
    }
}

impl App for FatalApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        CentralPanel::default().show(ctx, |ui| {
            let extra = ((ui.available_height() - 120.0) / 2.0).max(0.0);
            ui.add_space(extra);
            ui.vertical_centered(|ui| {
                ui.heading("⚠ No se pudo cargar el catálogo de materiales");
                ui.add_space(8.0);
                ui.label(&self.message);
            });
        });
    }
}
