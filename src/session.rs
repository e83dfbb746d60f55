//! Cookie-identified sessions carrying one-shot flash messages.
//!
//! Only sessions with a pending message hold server-side state; taking the
//! flash removes the entry, and entries nobody comes back for expire after
//! the configured TTL.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}

struct PendingFlash {
    flash: Flash,
    expires_at: Instant,
}

impl PendingFlash {
    fn is_valid(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Clone)]
pub struct SessionStore {
    cookie_name: Arc<str>,
    ttl: Duration,
    pending: Arc<Mutex<HashMap<Uuid, PendingFlash>>>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        let cookie_name: String = cookie_name.into();
        Self {
            cookie_name: Arc::from(cookie_name),
            ttl,
            pending: Arc::default(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Number of sessions with undelivered, unexpired messages.
    pub fn pending_count(&self) -> usize {
        self.lock_live().len()
    }

    pub fn session(&self, id: Uuid) -> Session {
        Session {
            id,
            store: self.clone(),
        }
    }

    /// Locks the map after dropping every expired entry.
    fn lock_live(&self) -> MutexGuard<'_, HashMap<Uuid, PendingFlash>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        pending.retain(|_, entry| entry.is_valid(now));
        pending
    }

    fn update(&self, id: Uuid, apply: impl FnOnce(&mut Flash)) {
        let expires_at = Instant::now() + self.ttl;
        let mut pending = self.lock_live();
        let entry = pending.entry(id).or_insert_with(|| PendingFlash {
            flash: Flash::default(),
            expires_at,
        });
        entry.expires_at = expires_at;
        apply(&mut entry.flash);
    }

    fn take(&self, id: Uuid) -> Flash {
        self.lock_live()
            .remove(&id)
            .map(|entry| entry.flash)
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct Session {
    id: Uuid,
    store: SessionStore,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn flash_success(&self, message: impl Into<String>) {
        let message = message.into();
        self.store.update(self.id, |flash| flash.success = Some(message));
    }

    pub fn flash_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.store.update(self.id, |flash| flash.error = Some(message));
    }

    /// Returns and clears the pending messages.
    pub fn take_flash(&self) -> Flash {
        self.store.take(self.id)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::internal("session middleware is not installed"))
    }
}

/// Attaches a [`Session`] to every request, issuing a cookie when the
/// browser did not present one.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = session_id_from_headers(req.headers(), store.cookie_name());
    let id = existing.unwrap_or_else(Uuid::new_v4);
    req.extensions_mut().insert(store.session(id));

    let mut response = next.run(req).await;

    if existing.is_none() {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            store.cookie_name(),
            id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "failed to encode session cookie"),
        }
    }

    response
}

fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
