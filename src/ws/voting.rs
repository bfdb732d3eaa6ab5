//! Voting-stage handlers: the per-voter category walk

use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::Direction;
use std::sync::Arc;

pub async fn handle_select_voter(state: &Arc<AppState>, name: String) -> Option<ServerMessage> {
    match state.select_voter(&name).await {
        Ok(_) => Some(state.phase_message().await),
        Err(e) => Some(e.into()),
    }
}

/// Replies with the voter's progress so the screen can mark answered categories
pub async fn handle_cast_vote(
    state: &Arc<AppState>,
    voter: String,
    category: String,
    candidate: String,
) -> Option<ServerMessage> {
    match state.cast_vote(&voter, &category, &candidate).await {
        Ok(progress) => {
            let complete = progress.iter().all(|p| p.choice.is_some());
            Some(ServerMessage::VotingProgress {
                voter,
                progress,
                complete,
            })
        }
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_advance_category(
    state: &Arc<AppState>,
    direction: Direction,
) -> Option<ServerMessage> {
    match state.advance_category(direction).await {
        Ok(_) => Some(state.phase_message().await),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_finish_voting(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.finish_voting().await {
        Ok(_) => Some(state.phase_message().await),
        Err(e) => Some(e.into()),
    }
}

pub async fn handle_show_results(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.show_results().await {
        Ok(cards) => Some(ServerMessage::Results { cards }),
        Err(e) => Some(e.into()),
    }
}
