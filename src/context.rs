use std::sync::Arc;

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::ApiResult;
use crate::preferences::Preferences;
use crate::profile_cache::ProfileCache;
use crate::session::SessionStore;
use crate::storage::Storage;

/// The process-wide client state, constructed once at startup and passed by reference.
#[derive(Debug)]
pub struct ClientContext {
    pub api: Dispatcher,
    pub profile_cache: ProfileCache,
    pub preferences: Preferences,
}

impl ClientContext {
    /// Load the persisted session and wire the dispatcher to it.
    pub fn init(config: &ClientConfig, storage: Arc<dyn Storage>) -> ApiResult<Self> {
        let session = Arc::new(SessionStore::init(storage.clone()));
        Ok(Self {
            api: Dispatcher::new(config, session)?,
            profile_cache: ProfileCache::new(),
            preferences: Preferences::new(storage),
        })
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Forget the session and the cached profile.
    pub fn logout(&self) {
        self.api.session().clear_token();
        self.profile_cache.clear_profile();
    }
}
