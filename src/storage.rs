// src/storage.rs
//
// Almacén clave/valor con caducidad para los "hechos" por material.
// Cada hecho se guarda por separado: no hay transacciones entre claves,
// así que los lectores deben tolerar estado parcialmente aplicado.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ventana de retención de todos los hechos persistidos.
pub const RETENTION_DAYS: u64 = 30;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Clave global con el último material visitado.
pub const LAST_MATERIAL_KEY: &str = "last_material_id";

/// Campos persistidos por material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fact {
    VideoCompleted,
    QuizCompleted,
    QuizAnswers,
    QuizScore,
}

impl Fact {
    pub fn suffix(self) -> &'static str {
        match self {
            Fact::VideoCompleted => "video_completed",
            Fact::QuizCompleted => "quiz_completed",
            Fact::QuizAnswers => "quiz_answers",
            Fact::QuizScore => "quiz_score",
        }
    }
}

/// Clave con espacio de nombres por material: `material_<id>_<campo>`
pub fn material_key(material_id: &str, fact: Fact) -> String {
    format!("material_{}_{}", material_id, fact.suffix())
}

/// Valor con caducidad absoluta, fijada al escribir (no se renueva al leer).
#[derive(Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: u64, // epoch segundos
}

/// Backend crudo: strings por clave más un reloj. Las implementaciones no
/// saben nada de caducidades; eso lo gestiona [`FactStore`].
pub trait StorageBackend {
    fn read_raw(&self, key: &str) -> Option<String>;
    fn write_raw(&mut self, key: &str, raw: &str);
    fn remove_raw(&mut self, key: &str);
    fn now_secs(&self) -> u64;
}

pub struct FactStore {
    backend: Box<dyn StorageBackend>,
}

impl FactStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        FactStore { backend }
    }

    pub fn set(&mut self, key: &str, value: &str, ttl_days: u64) {
        let entry = Entry {
            value: value.to_owned(),
            expires_at: self.backend.now_secs() + ttl_days * SECS_PER_DAY,
        };
        match serde_json::to_string(&entry) {
            Ok(raw) => self.backend.write_raw(key, &raw),
            Err(err) => log::warn!("no se pudo serializar la entrada {key}: {err}"),
        }
    }

    /// Valor almacenado, o ausente si no existe o ya caducó.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = self.backend.read_raw(key)?;
        let entry: Entry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("entrada ilegible en {key}: {err}");
                return None;
            }
        };
        if self.backend.now_secs() >= entry.expires_at {
            return None;
        }
        Some(entry.value)
    }

    pub fn delete(&mut self, key: &str) {
        self.backend.remove_raw(key);
    }

    /// Hechos booleanos: presentes y con valor "true".
    pub fn get_flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }
}

// ---------------------------------------------------------------------------
// Backend en memoria (tests y fallback). El estado va detrás de un Rc para
// que los tests conserven un asidero con el que avanzar el reloj.
// ---------------------------------------------------------------------------

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
pub struct MemoryState {
    entries: HashMap<String, String>,
    write_counts: HashMap<String, usize>,
    now_secs: u64,
}

#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asidero compartido sobre el mismo estado.
    pub fn handle(&self) -> MemoryBackend {
        self.clone()
    }

    pub fn advance_days(&self, days: u64) {
        self.state.borrow_mut().now_secs += days * SECS_PER_DAY;
    }

    pub fn advance_secs(&self, secs: u64) {
        self.state.borrow_mut().now_secs += secs;
    }

    /// Número de claves vivas (sin filtrar caducidad).
    pub fn raw_len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn contains_raw(&self, key: &str) -> bool {
        self.state.borrow().entries.contains_key(key)
    }

    /// Cuántas veces se ha escrito una clave (para comprobar idempotencia).
    pub fn write_count_for(&self, key: &str) -> usize {
        self.state
            .borrow()
            .write_counts
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Escribe un valor crudo saltándose el formato de entrada, para simular
    /// almacenamiento corrupto.
    pub fn inject_raw(&self, key: &str, raw: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_owned(), raw.to_owned());
    }
}

impl StorageBackend for MemoryBackend {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).cloned()
    }

    fn write_raw(&mut self, key: &str, raw: &str) {
        let mut state = self.state.borrow_mut();
        state.entries.insert(key.to_owned(), raw.to_owned());
        *state.write_counts.entry(key.to_owned()).or_insert(0) += 1;
    }

    fn remove_raw(&mut self, key: &str) {
        self.state.borrow_mut().entries.remove(key);
    }

    fn now_secs(&self) -> u64 {
        self.state.borrow().now_secs
    }
}

// ---------------------------------------------------------------------------
// Backend nativo: fichero JSON junto al binario, como el progreso clásico
// en `player_progress.json`.
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
pub struct FileBackend {
    path: std::path::PathBuf,
    entries: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileBackend {
    pub fn load_default() -> Self {
        Self::load_from("player_progress.json")
    }

    pub fn load_from(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        FileBackend { path, entries }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&self.path, json) {
                    log::warn!("no se pudo guardar {}: {err}", self.path.display());
                }
            }
            Err(err) => log::warn!("no se pudo serializar el progreso: {err}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for FileBackend {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write_raw(&mut self, key: &str, raw: &str) {
        self.entries.insert(key.to_owned(), raw.to_owned());
        self.persist();
    }

    fn remove_raw(&mut self, key: &str) {
        self.entries.remove(key);
        self.persist();
    }

    fn now_secs(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Backend web: localStorage del navegador.
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
pub struct BrowserBackend;

#[cfg(target_arch = "wasm32")]
impl BrowserBackend {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for BrowserBackend {
    fn read_raw(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok()?
    }

    fn write_raw(&mut self, key: &str, raw: &str) {
        if let Some(storage) = Self::local_storage() {
            if storage.set_item(key, raw).is_err() {
                log::warn!("localStorage rechazó la escritura de {key}");
            }
        }
    }

    fn remove_raw(&mut self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn now_secs(&self) -> u64 {
        (web_sys::js_sys::Date::now() / 1000.0) as u64
    }
}

/// Backend por defecto de cada plataforma.
pub fn default_backend() -> Box<dyn StorageBackend> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(BrowserBackend)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(FileBackend::load_default())
    }
}
