use video_quiz::PlayerApp;
use video_quiz::ui::views::error::FatalApp;

fn build_app() -> Box<dyn eframe::App> {
    match PlayerApp::new() {
        Ok(app) => Box::new(app),
        Err(err) => {
            // Fatal: sin catálogo no se renderiza ningún material
            log::error!("{err}");
            Box::new(FatalApp::new(err.to_string()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Reproductor de módulos",
        options,
        Box::new(|_cc| Ok(build_app())),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("sin window")
            .document()
            .expect("sin document");
        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("falta el canvas the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id no es un canvas");

        eframe::WebRunner::new()
            .start(canvas, web_options, Box::new(|_cc| Ok(build_app())))
            .await
            .expect("no se pudo arrancar eframe");
    });
}
