use std::sync::Arc;

use tracing::warn;

use crate::storage::Storage;

pub const SOUND_ENABLED_KEY: &str = "soundEnabled";

/// User preferences persisted next to the session.
///
/// Sound playback itself lives outside this crate; it only reads the flag.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn Storage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Enabled unless explicitly stored as `"false"`.
    pub fn sound_enabled(&self) -> bool {
        self.storage.get_item(SOUND_ENABLED_KEY).as_deref() != Some("false")
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        if let Err(err) = self
            .storage
            .set_item(SOUND_ENABLED_KEY, if enabled { "true" } else { "false" })
        {
            warn!(?err, enabled, "failed to persist sound preference");
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("sound_enabled", &self.sound_enabled())
            .finish()
    }
}
