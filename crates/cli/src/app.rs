use std::sync::Arc;

use anyhow::Result;
use cinesync_catalog::{TmdbClient, DEFAULT_BASE_URL};
use cinesync_core::{IdentityResolver, Settings};
use cinesync_service::{AuthGate, SavedItemRegistry, SearchPopularityTracker};
use cinesync_storage::{RemoteStore, StoreBackend};

use crate::session::LocalSessionIdentity;
use crate::{ensure_db_dir, get_db_path, get_session_path};

/// Components wired once per run and shared by every command.
pub(crate) struct App {
    pub(crate) session: Arc<LocalSessionIdentity>,
    pub(crate) gate: AuthGate,
    pub(crate) tracker: SearchPopularityTracker,
    pub(crate) registry: SavedItemRegistry,
}

impl App {
    pub(crate) fn open(ephemeral: bool) -> Result<Self> {
        let settings = Settings::from_env();
        let store = if ephemeral {
            StoreBackend::new_memory()
        } else {
            let db_path = get_db_path();
            ensure_db_dir(&db_path)?;
            StoreBackend::new_sqlite(&db_path)?
        };
        let session = Arc::new(LocalSessionIdentity::new(get_session_path()));
        Ok(Self::new(Arc::new(store), session, &settings))
    }

    fn new(
        store: Arc<dyn RemoteStore>,
        session: Arc<LocalSessionIdentity>,
        settings: &Settings,
    ) -> Self {
        let gate = AuthGate::new(Arc::clone(&session) as Arc<dyn IdentityResolver>);
        Self {
            tracker: SearchPopularityTracker::new(Arc::clone(&store), settings),
            registry: SavedItemRegistry::new(store, gate.clone(), settings),
            gate,
            session,
        }
    }
}

pub(crate) fn catalog_client() -> Result<TmdbClient> {
    let token = std::env::var("CINESYNC_TMDB_TOKEN").map_err(|_| {
        anyhow::anyhow!("CINESYNC_TMDB_TOKEN environment variable must be set to query the catalog")
    })?;
    let base_url =
        std::env::var("CINESYNC_TMDB_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
    Ok(TmdbClient::new(token, base_url)?)
}
