//! Серверные сессии посетителей.
//!
//! Сессия заменяет localStorage браузера: тут лежат выбранная тема, токен
//! админа под фиксированным ключом и последнее бронирование (для билета).
//! Хранится только в памяти процесса. Сессия заводится при первой записи,
//! а неактивные дольше TTL вычищаются.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Booking, Event};
use crate::theme::{Theme, ThemeContext};

pub const SESSION_COOKIE: &str = "tickethub_sid";
/// Ключ, под которым лежит токен админа.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub theme: Theme,
    pub storage: HashMap<String, String>,
    pub last_booking: Option<(Booking, Event)>,
}

impl SessionData {
    pub fn admin_token(&self) -> Option<&str> {
        self.storage.get(ADMIN_TOKEN_KEY).map(String::as_str)
    }
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    touched: Instant,
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    default_theme: Theme,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(default_theme: Theme, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            default_theme,
            ttl,
        }
    }

    /// Пустые данные для посетителя без сессии.
    pub fn blank(&self) -> SessionData {
        SessionData { theme: self.default_theme, ..Default::default() }
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, Entry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched.elapsed() < self.ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "Expired sessions pruned");
        }
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        self.prune(&mut sessions);
        sessions.insert(id, Entry { data: self.blank(), touched: Instant::now() });
        debug!(session = %id, "Session created");
        id
    }

    pub fn exists(&self, id: Uuid) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .is_some_and(|entry| entry.touched.elapsed() < self.ttl)
    }

    /// Живые сессии.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|entry| entry.touched.elapsed() < self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Снимок данных сессии (продлевает ее); для неизвестной или истекшей - пустые данные.
    pub fn get(&self, id: Uuid) -> SessionData {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        match sessions.get_mut(&id) {
            Some(entry) if entry.touched.elapsed() < self.ttl => {
                entry.touched = Instant::now();
                entry.data.clone()
            }
            _ => self.blank(),
        }
    }

    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        self.prune(&mut sessions);
        let entry = sessions
            .entry(id)
            .or_insert_with(|| Entry { data: self.blank(), touched: Instant::now() });
        entry.touched = Instant::now();
        f(&mut entry.data)
    }

    /// Контекст темы, сеттер которого пишет в сессию посетителя (заводя ее при необходимости).
    pub fn theme_context(&self, handle: &SessionHandle) -> ThemeContext {
        let theme = handle.id().map(|id| self.get(id).theme).unwrap_or(self.default_theme);
        let store = self.clone();
        let handle = handle.clone();
        ThemeContext::new(
            theme,
            Arc::new(move |theme| {
                let id = handle.get_or_create(&store);
                store.update(id, |data| data.theme = theme);
            }),
        )
    }

    pub fn sign_in(&self, id: Uuid) -> String {
        let token = format!("fake-jwt-token-{}", Utc::now().timestamp_millis());
        self.update(id, |data| data.storage.insert(ADMIN_TOKEN_KEY.to_string(), token.clone()));
        info!(session = %id, "Admin signed in");
        token
    }

    pub fn sign_out(&self, id: Uuid) {
        self.update(id, |data| data.storage.remove(ADMIN_TOKEN_KEY));
        info!(session = %id, "Admin signed out");
    }
}

/// Сессия текущего запроса: пустая, пока в нее ничего не записали.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<Mutex<Option<Uuid>>>);

impl SessionHandle {
    pub fn new(existing: Option<Uuid>) -> Self {
        Self(Arc::new(Mutex::new(existing)))
    }

    pub fn id(&self) -> Option<Uuid> {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// id для записи; новая сессия создается только здесь.
    pub fn get_or_create(&self, store: &SessionStore) -> Uuid {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        match *slot {
            Some(id) if store.exists(id) => id,
            _ => {
                let id = store.create();
                *slot = Some(id);
                id
            }
        }
    }
}
