//! Setup-stage handlers: roster and category editing, starting the vote

use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::SUGGESTED_CATEGORIES;
use std::sync::Arc;

pub async fn handle_add_participant(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    match state.add_participant(&name).await {
        Ok(participants) => Some(ServerMessage::Roster { participants }),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_remove_participant(
    state: &Arc<AppState>,
    name: String,
) -> Option<ServerMessage> {
    match state.remove_participant(&name).await {
        Ok(participants) => Some(ServerMessage::Roster { participants }),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_add_category(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    match state.add_category(&name).await {
        Ok(categories) => Some(ServerMessage::Categories { categories }),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_remove_category(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    match state.remove_category(&name).await {
        Ok(categories) => Some(ServerMessage::Categories { categories }),
        Err(e) => Some(e.into()),
    }
}

/// Suggestions not already in the category list
pub async fn handle_suggested_categories(state: &Arc<AppState>) -> Option<ServerMessage> {
    let session = state.session.read().await;
    let categories = SUGGESTED_CATEGORIES
        .iter()
        .filter(|suggestion| !session.categories().iter().any(|c| c == *suggestion))
        .map(|suggestion| suggestion.to_string())
        .collect();
    Some(ServerMessage::SuggestedCategories { categories })
}

pub async fn handle_start_voting(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Starting voting");
    match state.start_voting().await {
        Ok(_) => Some(state.phase_message().await),
        Err(e) => Some(e.into()),
    }
}
