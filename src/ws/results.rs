//! Results-stage handlers: tallies, the reveal walk and starting over

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

/// Tallies are readable in any phase; they are never cached
pub async fn handle_tally(state: &Arc<AppState>, category: String) -> Option<ServerMessage> {
    let (result, standings) = state.tally(&category).await;
    Some(ServerMessage::Tally {
        category,
        result,
        standings,
    })
}

pub async fn handle_reveal_next(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.reveal_next().await {
        Ok(update) => Some(update),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_reveal_prev(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.reveal_prev().await {
        Ok(update) => Some(update),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_reset(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Resetting session");
    state.reset().await;
    Some(state.phase_message().await)
}
