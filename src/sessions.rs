//! One page per browser. The page state a session sees is never shared with
//! another session, notices included.

use crate::client::AttendanceApi;
use crate::controller::Controller;
use axum::http::{HeaderMap, header::COOKIE};
use chrono::Local;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "attendance_session";
pub const MAX_SESSIONS: usize = 256;

#[derive(Default)]
struct OpenPages {
    controllers: HashMap<String, Controller>,
    /// Session ids, oldest first.
    order: VecDeque<String>,
}

pub struct Sessions {
    api: Arc<dyn AttendanceApi>,
    search_debounce: Duration,
    open: Mutex<OpenPages>,
}

impl Sessions {
    pub fn new(api: Arc<dyn AttendanceApi>, search_debounce: Duration) -> Self {
        Self {
            api,
            search_debounce,
            open: Mutex::new(OpenPages::default()),
        }
    }

    /// Returns the page for `id`. An unknown or missing id starts a new page
    /// under a fresh id, with its initial loads already under way.
    pub async fn resume(&self, id: Option<&str>) -> (String, Controller) {
        let mut open = self.open.lock().await;
        if let Some(id) = id {
            if let Some(controller) = open.controllers.get(id) {
                return (id.to_string(), controller.clone());
            }
        }

        let id = Uuid::new_v4().simple().to_string();
        let controller = Controller::new(
            Arc::clone(&self.api),
            Local::now().date_naive(),
            self.search_debounce,
        );
        controller.init().await;

        if open.order.len() >= MAX_SESSIONS {
            if let Some(oldest) = open.order.pop_front() {
                open.controllers.remove(&oldest);
                debug!(session = %oldest, "dropping oldest page session");
            }
        }
        open.order.push_back(id.clone());
        open.controllers.insert(id.clone(), controller.clone());
        info!(session = %id, "page session started");

        (id, controller)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.open.lock().await.controllers.len()
    }
}

/// Session id carried in the request's `Cookie` header, if any.
pub fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}
