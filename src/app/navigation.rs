use super::*;
use crate::embed::{EmbedEvent, PlaybackState};
use crate::storage::{LAST_MATERIAL_KEY, RETENTION_DAYS};

impl PlayerApp {
    /// Hace actual un material: reinicia lo transitorio, relee los hechos
    /// persistidos y (re)inicializa el embed.
    pub(crate) fn enter_material(&mut self, material_id: String) {
        self.session = Session {
            material_id,
            ..Session::default()
        };
        self.derive_phase();
        self.initialize_embed();
    }

    /// Cambio de material. Con el mismo id solo se cierra el panel lateral.
    pub fn switch_material(&mut self, material_id: &str) {
        if material_id == self.session.material_id {
            self.sidebar_open = false;
            return;
        }
        if self.catalog.find_by_id(material_id).is_none() {
            log::warn!("cambio a material desconocido: {material_id}");
            return;
        }

        // Nunca dos instancias vivas para el mismo punto de montaje
        self.destroy_embed();

        push_url_material_id(material_id);
        self.store
            .set(LAST_MATERIAL_KEY, material_id, RETENTION_DAYS);

        self.enter_material(material_id.to_owned());
        self.sidebar_open = false;
    }

    pub fn abrir_menu_lateral(&mut self) {
        self.sidebar_open = true;
    }

    pub fn cerrar_menu_lateral(&mut self) {
        self.sidebar_open = false;
    }

    fn destroy_embed(&mut self) {
        if self.embed.has_instance() {
            self.embed.destroy();
        }
        self.live_embed_for = None;
    }

    /// Crea el embed para el material actual, o lo deja aplazado si el API
    /// externo aún no ha señalado su disponibilidad global.
    fn initialize_embed(&mut self) {
        let material_id = self.session.material_id.clone();
        if !self.embed.api_ready() {
            self.pending_init = Some(PendingInit { material_id });
            return;
        }
        self.create_embed_now(&material_id);
    }

    fn create_embed_now(&mut self, material_id: &str) {
        let Some(material) = self.catalog.find_by_id(material_id) else {
            return;
        };
        let video_ref = material.video_ref.clone();
        self.embed.create(PLAYER_CONTAINER_ID, &video_ref);
        self.live_embed_for = Some(material_id.to_owned());
    }

    /// Bomba de eventos del embed; se llama una vez por fotograma.
    pub fn pump_embed_events(&mut self) {
        // Inicialización aplazada: como mucho se honra una por evento de
        // disponibilidad, y solo si su material sigue siendo el actual.
        if self.embed.api_ready() {
            if let Some(pending) = self.pending_init.take() {
                if pending.material_id == self.session.material_id {
                    self.create_embed_now(&pending.material_id);
                } else {
                    // Contexto caducado: descartar en silencio
                    log::info!(
                        "init de embed descartada: {} ya no es el material actual",
                        pending.material_id
                    );
                }
            }
        }

        for event in self.embed.poll() {
            self.handle_embed_event(event);
        }
    }

    fn handle_embed_event(&mut self, event: EmbedEvent) {
        // Eventos de una instancia que no corresponde al material actual
        // (el usuario cambió antes de que llegara la notificación): no-op.
        if self.live_embed_for.as_deref() != Some(self.session.material_id.as_str()) {
            return;
        }
        match event {
            // La fase ya se derivó al entrar al material; no hay nada que
            // restaurar aparte de lo que pinta cada fotograma.
            EmbedEvent::InstanceReady => {}
            EmbedEvent::StateChange(PlaybackState::Ended) => self.marcar_video_visto(),
            EmbedEvent::StateChange(_) => {}
        }
    }
}

/// Id de material en la query de la URL (`?id=...`), solo en el navegador.
#[cfg(target_arch = "wasm32")]
pub fn url_material_id() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        if key == "id" && !value.is_empty() {
            let decoded = web_sys::js_sys::decode_uri_component(value).ok()?;
            return decoded.as_string();
        }
    }
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn url_material_id() -> Option<String> {
    None
}

/// Actualiza la URL compartible sin navegar. El historial solo se escribe;
/// atrás/adelante del navegador queda fuera de alcance.
#[cfg(target_arch = "wasm32")]
fn push_url_material_id(material_id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let encoded = web_sys::js_sys::encode_uri_component(material_id);
    let url = format!("?id={}", String::from(encoded));
    if history
        .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        .is_err()
    {
        log::warn!("no se pudo actualizar la URL para {material_id}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn push_url_material_id(_material_id: &str) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::embed::{EmbedEvent, PlaybackState, ScriptedHost};
    use crate::model::MaterialPhase;
    use crate::storage::{Fact, FactStore, MemoryBackend, material_key};

    const DOC: &str = r#"
- id: "A"
  title: "a"
  description: "d"
  video_ref: "va"
  questions:
    - text: "q"
      options: ["x", "y"]
  answer_key: ["A"]
- id: "B"
  title: "b"
  description: "d"
  video_ref: "vb"
  questions:
    - text: "q"
      options: ["x", "y"]
  answer_key: ["B"]
"#;

    fn test_app(api_ready: bool) -> (PlayerApp, MemoryBackend, ScriptedHost) {
        let backend = MemoryBackend::new();
        let store_handle = backend.handle();
        let host = ScriptedHost::new();
        host.set_api_ready(api_ready);
        let host_handle = host.handle();
        let catalog = Catalog::from_document(DOC).expect("catálogo de prueba");
        let app = PlayerApp::with_parts(catalog, FactStore::new(Box::new(backend)), Box::new(host));
        (app, store_handle, host_handle)
    }

    #[test]
    fn startup_creates_embed_when_api_ready() {
        let (app, _store, host) = test_app(true);
        assert_eq!(host.live_video().as_deref(), Some("va"));
        assert_eq!(app.live_embed_for.as_deref(), Some("A"));
    }

    #[test]
    fn startup_defers_init_until_api_ready() {
        let (mut app, _store, host) = test_app(false);
        assert!(host.live_video().is_none());
        assert!(app.pending_init.is_some());

        host.set_api_ready(true);
        app.pump_embed_events();
        assert_eq!(host.live_video().as_deref(), Some("va"));
        assert!(app.pending_init.is_none());
    }

    #[test]
    fn switch_to_same_id_only_closes_drawer() {
        let (mut app, store, host) = test_app(true);
        app.abrir_menu_lateral();
        let created_before = host.created();

        app.switch_material("A");

        assert!(!app.sidebar_open);
        assert_eq!(host.created(), created_before);
        assert!(!store.contains_raw(LAST_MATERIAL_KEY));
    }

    #[test]
    fn switch_destroys_old_embed_and_persists_last_visited() {
        let (mut app, store, host) = test_app(true);
        app.switch_material("B");

        assert_eq!(host.destroyed(), 1);
        assert_eq!(host.live_video().as_deref(), Some("vb"));
        assert_eq!(app.session.material_id, "B");
        assert!(store.contains_raw(LAST_MATERIAL_KEY));
    }

    #[test]
    fn switch_resets_transient_flags_but_rereads_facts() {
        let (mut app, _store, host) = test_app(true);
        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        app.pump_embed_events();
        assert!(app.session.video_completed_this_session);

        app.switch_material("B");
        assert!(!app.session.video_completed_this_session);
        assert_eq!(app.session.phase, MaterialPhase::VideoPending);

        // Al volver, el hecho persistido de A sigue ahí
        app.switch_material("A");
        assert!(!app.session.video_completed_this_session);
        assert_eq!(app.session.phase, MaterialPhase::QuizPending);
    }

    #[test]
    fn stale_pending_init_is_discarded_silently() {
        let (mut app, store, host) = test_app(false);
        // Init de A aplazada; el API se activa justo cuando el usuario ya
        // cambió a B.
        host.set_api_ready(true);
        app.switch_material("B");
        assert_eq!(host.live_video().as_deref(), Some("vb"));

        app.pump_embed_events();

        // La init caducada de A no toca ni el embed ni el estado de B
        assert_eq!(host.live_video().as_deref(), Some("vb"));
        assert_eq!(app.session.material_id, "B");
        assert_eq!(app.session.phase, MaterialPhase::VideoPending);
        assert!(!store.contains_raw(&material_key("A", Fact::VideoCompleted)));
        assert!(app.pending_init.is_none());
    }

    #[test]
    fn switch_to_unknown_material_is_a_no_op() {
        let (mut app, _store, host) = test_app(true);
        app.switch_material("Z");
        assert_eq!(app.session.material_id, "A");
        assert_eq!(host.live_video().as_deref(), Some("va"));
    }

    #[test]
    fn events_after_switch_do_not_leak_into_new_material() {
        let (mut app, store, host) = test_app(true);
        // La instancia de A deja un evento en cola y el usuario cambia a B
        host.push_event(EmbedEvent::StateChange(PlaybackState::Ended));
        app.switch_material("B");
        app.pump_embed_events();

        // B no hereda el fin de vídeo de A
        assert!(!store.contains_raw(&material_key("B", Fact::VideoCompleted)));
        assert!(!store.contains_raw(&material_key("A", Fact::VideoCompleted)));
    }
}
