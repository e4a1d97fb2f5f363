// src/embed.rs
//
// Capacidad de vídeo externa, opaca más allá de crear/destruir y sus
// notificaciones: "API global lista", "instancia lista" y cambios discretos
// de estado de reproducción. El único estado que importa es `Ended`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Estado discreto que notifica el widget. Códigos del API del reproductor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlaybackState {
    pub fn from_code(code: i32) -> Option<PlaybackState> {
        match code {
            -1 => Some(PlaybackState::Unstarted),
            0 => Some(PlaybackState::Ended),
            1 => Some(PlaybackState::Playing),
            2 => Some(PlaybackState::Paused),
            3 => Some(PlaybackState::Buffering),
            5 => Some(PlaybackState::Cued),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedEvent {
    /// La instancia creada ha terminado de inicializarse.
    InstanceReady,
    StateChange(PlaybackState),
}

/// Anfitrión del widget externo. Una sola instancia viva como máximo:
/// `create` sobre una instancia viva la destruye primero.
pub trait EmbedHost {
    /// ¿Ha señalado el API externo su disponibilidad global?
    fn api_ready(&self) -> bool;
    fn create(&mut self, container_id: &str, video_ref: &str);
    fn destroy(&mut self);
    fn has_instance(&self) -> bool;
    /// Drena los eventos pendientes de la instancia viva.
    fn poll(&mut self) -> Vec<EmbedEvent>;
}

// ---------------------------------------------------------------------------
// Anfitrión nulo para el escritorio: no hay reproducción real, pero el ciclo
// crear/destruir se respeta y la instancia queda lista al momento.
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct NullHost {
    live: bool,
    pending_ready: bool,
}

impl EmbedHost for NullHost {
    fn api_ready(&self) -> bool {
        true
    }

    fn create(&mut self, _container_id: &str, _video_ref: &str) {
        self.live = true;
        self.pending_ready = true;
    }

    fn destroy(&mut self) {
        self.live = false;
        self.pending_ready = false;
    }

    fn has_instance(&self) -> bool {
        self.live
    }

    fn poll(&mut self) -> Vec<EmbedEvent> {
        if self.pending_ready {
            self.pending_ready = false;
            vec![EmbedEvent::InstanceReady]
        } else {
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Anfitrión guionizado para tests: el guion decide cuándo está listo el API
// y qué eventos llegan. Estado compartido vía Rc para conservar un asidero.
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ScriptedState {
    api_ready: bool,
    live: Option<(String, String)>, // (container, video_ref)
    queue: VecDeque<EmbedEvent>,
    pub created: usize,
    pub destroyed: usize,
}

#[derive(Clone, Default)]
pub struct ScriptedHost {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScriptedHost {
        self.clone()
    }

    pub fn set_api_ready(&self, ready: bool) {
        self.state.borrow_mut().api_ready = ready;
    }

    /// Encola un evento como si lo emitiera la instancia viva.
    pub fn push_event(&self, event: EmbedEvent) {
        self.state.borrow_mut().queue.push_back(event);
    }

    pub fn live_video(&self) -> Option<String> {
        self.state.borrow().live.as_ref().map(|(_, v)| v.clone())
    }

    pub fn created(&self) -> usize {
        self.state.borrow().created
    }

    pub fn destroyed(&self) -> usize {
        self.state.borrow().destroyed
    }
}

impl EmbedHost for ScriptedHost {
    fn api_ready(&self) -> bool {
        self.state.borrow().api_ready
    }

    fn create(&mut self, container_id: &str, video_ref: &str) {
        let mut state = self.state.borrow_mut();
        if state.live.is_some() {
            state.destroyed += 1;
        }
        state.live = Some((container_id.to_owned(), video_ref.to_owned()));
        state.created += 1;
        state.queue.push_back(EmbedEvent::InstanceReady);
    }

    fn destroy(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.live.take().is_some() {
            state.destroyed += 1;
        }
        // Una instancia destruida ya no emite nada.
        state.queue.clear();
    }

    fn has_instance(&self) -> bool {
        self.state.borrow().live.is_some()
    }

    fn poll(&mut self) -> Vec<EmbedEvent> {
        self.state.borrow_mut().queue.drain(..).collect()
    }
}

// ---------------------------------------------------------------------------
// Anfitrión web: puente con el widget real a través de globales de window,
// al estilo del handshake onYouTubeIframeAPIReady. El shim JS de la página
// expone:
//   window.embedApiReady        -> truthy cuando el API global está listo
//   window.embedCreate(c, v)    -> crea el reproductor en el contenedor c
//   window.embedDestroy()       -> destruye el reproductor vivo
//   window.embedTakeEvents()    -> array de códigos acumulados; 100 es
//                                  "instancia lista", el resto son estados
//                                  de reproducción del widget
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
pub struct WebHost {
    live: bool,
}

#[cfg(target_arch = "wasm32")]
impl WebHost {
    pub fn new() -> Self {
        WebHost { live: false }
    }

    fn window_fn(name: &str) -> Option<web_sys::js_sys::Function> {
        let window = web_sys::window()?;
        web_sys::js_sys::Reflect::get(window.as_ref(), &wasm_bindgen::JsValue::from_str(name))
            .ok()?
            .dyn_into()
            .ok()
    }
}

#[cfg(target_arch = "wasm32")]
impl EmbedHost for WebHost {
    fn api_ready(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        web_sys::js_sys::Reflect::get(
            window.as_ref(),
            &wasm_bindgen::JsValue::from_str("embedApiReady"),
        )
        .map(|v| v.is_truthy())
        .unwrap_or(false)
    }

    fn create(&mut self, container_id: &str, video_ref: &str) {
        let Some(create) = Self::window_fn("embedCreate") else {
            log::warn!("embedCreate no está disponible en window");
            return;
        };
        let this = wasm_bindgen::JsValue::NULL;
        if create
            .call2(
                &this,
                &wasm_bindgen::JsValue::from_str(container_id),
                &wasm_bindgen::JsValue::from_str(video_ref),
            )
            .is_err()
        {
            log::warn!("embedCreate falló para {video_ref}");
            return;
        }
        self.live = true;
    }

    fn destroy(&mut self) {
        if let Some(destroy) = Self::window_fn("embedDestroy") {
            let _ = destroy.call0(&wasm_bindgen::JsValue::NULL);
        }
        self.live = false;
    }

    fn has_instance(&self) -> bool {
        self.live
    }

    fn poll(&mut self) -> Vec<EmbedEvent> {
        let Some(take) = Self::window_fn("embedTakeEvents") else {
            return Vec::new();
        };
        let Ok(raw) = take.call0(&wasm_bindgen::JsValue::NULL) else {
            return Vec::new();
        };
        let Ok(array) = raw.dyn_into::<web_sys::js_sys::Array>() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for value in array.iter() {
            let Some(code) = value.as_f64() else { continue };
            let code = code as i32;
            if code == 100 {
                events.push(EmbedEvent::InstanceReady);
            } else if let Some(state) = PlaybackState::from_code(code) {
                events.push(EmbedEvent::StateChange(state));
            }
        }
        events
    }
}

/// Anfitrión por defecto de cada plataforma.
pub fn default_host() -> Box<dyn EmbedHost> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(WebHost::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(NullHost::default())
    }
}
