use crate::sessions::Sessions;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Sessions>,
}

impl AppState {
    pub fn new(sessions: Sessions) -> Self {
        Self {
            sessions: Arc::new(sessions),
        }
    }
}
