//! Session Store
//!
//! Holds the stepper state of every lesson in progress, keyed by an opaque
//! session id that the client carries in a cookie. Records are read at the
//! start of a request and written back whole at the end; the last writer
//! wins. A record that has not been written for longer than the store's
//! time-to-live is treated as gone and is swept on the next `create`.

use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use sozo_core::stepper::StepperState;
use std::{collections::HashMap, time::Duration};
use tokio::{sync::RwLock, time::Instant};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sozo_session";

/// Header accepted in place of the cookie for non-browser clients.
pub const SESSION_HEADER: &str = "x-session-id";

/// How long an untouched session is kept.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// The persisted record of one lesson in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub stepper: StepperState,
}

#[derive(Debug)]
struct StoredSession {
    record: SessionRecord,
    last_touched: Instant,
}

impl StoredSession {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.last_touched) >= ttl
    }
}

/// In-memory store of session records.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Creates a record for a freshly started lesson under a new session id.
    pub async fn create(&self, stepper: StepperState) -> SessionRecord {
        self.sweep().await;
        let record = SessionRecord {
            session_id: Uuid::new_v4(),
            stepper,
        };
        self.sessions.write().await.insert(
            record.session_id,
            StoredSession {
                record: record.clone(),
                last_touched: Instant::now(),
            },
        );
        record
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SessionRecord> {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .get(&session_id)
            .filter(|stored| !stored.is_expired(self.ttl, now))
            .map(|stored| stored.record.clone())
    }

    /// Replaces the stored record for `record.session_id`.
    ///
    /// Returns `false` without storing anything when the session was removed
    /// or expired in the meantime.
    pub async fn save(&self, record: SessionRecord) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&record.session_id) {
            Some(stored) if !stored.is_expired(self.ttl, now) => {
                stored.record = record;
                stored.last_touched = now;
                true
            }
            _ => false,
        }
    }

    pub async fn remove(&self, session_id: Uuid) -> Option<SessionRecord> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|stored| stored.record)
    }

    /// Drops every expired record and returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(self.ttl, now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "Expired sessions swept");
        }
        removed
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|stored| !stored.is_expired(self.ttl, now))
            .count()
    }
}

/// Extracts the session id from the session cookie or the `x-session-id` header.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok());

    from_cookie.or_else(|| {
        headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
    })
}

/// The `Set-Cookie` value binding the client to `session_id`.
pub fn session_cookie(session_id: Uuid) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}
