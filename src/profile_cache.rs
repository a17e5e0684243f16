use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, error};

use crate::dispatcher::Dispatcher;
use crate::endpoints::profile::get_user_profile;
use crate::error::ApiResult;
use crate::models::UserProfile;

/// Single-slot cache of the profile currently on screen.
///
/// Every fetch takes a ticket when it is issued. A response is stored only if
/// its ticket is still the newest one, so the most recently issued fetch owns
/// the slot no matter which response arrives last. `clear_profile` also
/// advances the ticket, which keeps in-flight fetches from refilling the slot
/// after a logout.
#[derive(Debug, Default)]
pub struct ProfileCache {
    profile: RwLock<Option<UserProfile>>,
    in_flight: AtomicUsize,
    latest_ticket: AtomicU64,
}

/// Releases the loading state when dropped, including when the fetch future is abandoned.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn engage(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn fetch_profile(&self, api: &Dispatcher, username: &str) -> ApiResult<UserProfile> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::engage(&self.in_flight);

        match get_user_profile(api, username).await {
            Ok(profile) => {
                let mut slot = self.profile.write().unwrap_or_else(PoisonError::into_inner);
                if self.latest_ticket.load(Ordering::SeqCst) == ticket {
                    *slot = Some(profile.clone());
                } else {
                    debug!(username, ticket, "discarding superseded profile response");
                }
                Ok(profile)
            }
            Err(err) => {
                error!(%err, username, "failed to fetch user profile");
                Err(err)
            }
        }
    }

    pub async fn refresh_profile(&self, api: &Dispatcher, username: &str) -> ApiResult<UserProfile> {
        self.fetch_profile(api, username).await
    }

    pub fn clear_profile(&self) {
        let mut slot = self.profile.write().unwrap_or_else(PoisonError::into_inner);
        self.latest_ticket.fetch_add(1, Ordering::SeqCst);
        *slot = None;
    }
}
