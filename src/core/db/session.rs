use std::future::Future;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::core::{
    db::{
        favorites::{Favorites, FavoritesRepository},
        hints::UiHints,
        storage::KeyValueStore,
    },
    filter::Tab,
    model::{ListingId, User},
};

pub const CURRENT_USER_KEY: &str = "currentUser";

pub trait SessionRepository {
    fn current_user(&self) -> impl Future<Output = anyhow::Result<Option<User>>> + Send;
    fn save_user(&self, user: &User) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn clear_user(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<S: KeyValueStore> SessionRepository for S {
    async fn current_user(&self) -> anyhow::Result<Option<User>> {
        match self.get(CURRENT_USER_KEY).await? {
            Some(raw) => {
                let user = serde_json::from_str(&raw)
                    .with_context(|| format!("Malformed {CURRENT_USER_KEY:?} record: {raw}"))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<()> {
        let raw = serde_json::to_string(user)?;
        self.set(CURRENT_USER_KEY, &raw).await?;
        info!(email = %user.email, "signed in");
        Ok(())
    }

    async fn clear_user(&self) -> anyhow::Result<()> {
        self.remove(CURRENT_USER_KEY).await?;
        info!("signed out");
        Ok(())
    }
}

/// Who is using the application, plus the state every protected screen
/// reads on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub favorites: Favorites,
}

/// Outcome of the check a protected screen performs when it is activated.
/// A store that never held a user and one whose user signed out are
/// indistinguishable here; both redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionGate {
    Allowed(Session),
    Redirect,
}

impl SessionGate {
    /// Reads the persisted user and favorites. An unreadable user record
    /// counts as signed out and unreadable favorites as none.
    pub async fn check<S: KeyValueStore>(store: &S) -> anyhow::Result<Self> {
        let user = match store.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("no session, redirecting to login");
                return Ok(SessionGate::Redirect);
            }
            Err(e) if e.chain().any(|c| c.is::<serde_json::Error>()) => {
                warn!(error = %e, "discarding unreadable session");
                return Ok(SessionGate::Redirect);
            }
            Err(e) => return Err(e),
        };

        let favorites = match store.load_favorites().await {
            Ok(favorites) => favorites,
            Err(e) if e.chain().any(|c| c.is::<serde_json::Error>()) => {
                warn!(error = %e, "discarding unreadable favorites");
                Favorites::new()
            }
            Err(e) => return Err(e),
        };

        Ok(SessionGate::Allowed(Session { user, favorites }))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionGate::Allowed(session) => Some(session),
            SessionGate::Redirect => None,
        }
    }
}

/// Everything the dashboard reads when it is activated: the gate outcome
/// and the one-shot hints left by other screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardActivation {
    pub gate: SessionGate,
    pub active_tab: Option<Tab>,
    pub edit_listing: Option<ListingId>,
}

impl DashboardActivation {
    /// Hints are only consumed when the gate lets the user through.
    pub async fn load<S: KeyValueStore>(store: &S) -> anyhow::Result<Self> {
        let gate = SessionGate::check(store).await?;
        if gate == SessionGate::Redirect {
            return Ok(Self {
                gate,
                active_tab: None,
                edit_listing: None,
            });
        }

        let active_tab = store.take_active_tab_hint().await?;
        let edit_listing = store.take_edit_hint().await?;
        Ok(Self {
            gate,
            active_tab,
            edit_listing,
        })
    }
}
