use crate::catalog::Catalog;
use crate::data::CatalogError;
use crate::embed::{EmbedHost, default_host};
use crate::model::{Material, MaterialPhase, UserAnswers};
use crate::quiz::{ReviewRow, Score};
use crate::storage::{FactStore, default_backend};

// Submódulos
pub mod actions;
pub mod navigation;
pub mod progress;
pub mod view_models;

// Re-export de view models
pub use crate::view_models::MaterialInfo;

/// Id del contenedor donde el widget externo monta el reproductor.
pub const PLAYER_CONTAINER_ID: &str = "player";

/// Estado transitorio de la sesión para el material actual. Se reinicia al
/// cambiar de material; la fuente autoritativa son los hechos del almacén.
#[derive(Default)]
pub struct Session {
    pub material_id: String,
    pub phase: MaterialPhase,
    pub video_completed_this_session: bool,
    pub quiz_submitted_this_session: bool,
    /// Selección del formulario, un radio por pregunta.
    pub selections: UserAnswers,
    /// Nota de un intento anterior, para el banner del formulario.
    pub previous_score: Option<u32>,
    /// Corrección y revisión a mostrar en la fase de resultados.
    pub score: Option<Score>,
    pub review: Vec<ReviewRow>,
    /// Aviso en línea (p. ej. envío incompleto).
    pub notice: String,
}

/// Inicialización del embed aplazada hasta que el API global esté listo.
/// Captura el material para poder descartarla si deja de ser el actual.
pub struct PendingInit {
    pub material_id: String,
}

pub struct PlayerApp {
    pub catalog: Catalog,
    pub store: FactStore,
    pub embed: Box<dyn EmbedHost>,
    pub session: Session,
    /// Material para el que se creó la instancia viva del embed.
    pub(crate) live_embed_for: Option<String>,
    pub(crate) pending_init: Option<PendingInit>,
    pub sidebar_open: bool,
}

impl PlayerApp {
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self::with_parts(
            Catalog::load_embedded()?,
            FactStore::new(default_backend()),
            default_host(),
        ))
    }

    /// Constructor con las piezas inyectadas (tests y arranques especiales).
    pub fn with_parts(catalog: Catalog, store: FactStore, embed: Box<dyn EmbedHost>) -> Self {
        let mut app = PlayerApp {
            catalog,
            store,
            embed,
            session: Session::default(),
            live_embed_for: None,
            pending_init: None,
            sidebar_open: false,
        };

        // Resolución inicial: id de la URL, luego último visitado, luego el
        // primero del catálogo.
        let url_id = navigation::url_material_id();
        let last_visited = app.store.get(crate::storage::LAST_MATERIAL_KEY);
        let initial_id = app
            .catalog
            .resolve_initial(url_id.as_deref(), last_visited.as_deref())
            .id
            .clone();
        app.enter_material(initial_id);
        app
    }

    /// Material actual. El id de sesión siempre proviene del catálogo.
    pub fn current_material(&self) -> &Material {
        self.catalog
            .find_by_id(&self.session.material_id)
            .unwrap_or_else(|| self.catalog.first())
    }
}
