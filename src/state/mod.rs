mod intents;
mod results;

use crate::config::AppConfig;
use crate::photo::{InMemoryPhotoStore, PhotoStore};
use crate::protocol::ServerMessage;
use crate::reveal::RevealSequencer;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one award session. Every intent runs to completion under the
    /// write lock, so mutations never interleave.
    pub session: Arc<RwLock<Session>>,
    /// Present while the results are being revealed
    pub reveal: Arc<RwLock<Option<RevealSequencer>>>,
    pub photos: Arc<dyn PhotoStore>,
    pub config: AppConfig,
    /// Broadcast channel for sending messages to every connected screen
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_photo_store(config, Arc::new(InMemoryPhotoStore::new()))
    }

    pub fn with_photo_store(config: AppConfig, photos: Arc<dyn PhotoStore>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            reveal: Arc::new(RwLock::new(None)),
            photos,
            config,
            broadcast: tx,
        }
    }

    /// Send a message to all connected clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }

    pub async fn snapshot(&self) -> crate::types::SessionSnapshot {
        self.session.read().await.snapshot()
    }

    /// Phase message describing the session as it is now
    pub async fn phase_message(&self) -> ServerMessage {
        phase_message(&*self.session.read().await)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn phase_message(session: &Session) -> ServerMessage {
    let (_, total) = session.voting_status();
    ServerMessage::Phase {
        phase: session.phase().clone(),
        stage: session.phase().stage(),
        round_no: session.round_no(),
        version: session.version(),
        voted: session.voted().to_vec(),
        total,
        actions: session.available_actions(),
        server_now: chrono::Utc::now().to_rfc3339(),
    }
}
