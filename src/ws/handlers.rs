//! WebSocket message dispatch
//!
//! Every client message is an intent against the single session. Each one
//! is routed to its stage-specific handler module; rejected intents come
//! back as `ServerMessage::Error` and leave the session untouched.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

use super::{results, setup, voting};

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        // Setup
        ClientMessage::AddParticipant { name } => setup::handle_add_participant(state, name).await,

        ClientMessage::RemoveParticipant { name } => {
            setup::handle_remove_participant(state, name).await
        }

        ClientMessage::AddCategory { name } => setup::handle_add_category(state, name).await,

        ClientMessage::RemoveCategory { name } => setup::handle_remove_category(state, name).await,

        ClientMessage::SuggestedCategories => setup::handle_suggested_categories(state).await,

        ClientMessage::StartVoting => setup::handle_start_voting(state).await,

        // Voting
        ClientMessage::SelectVoter { name } => voting::handle_select_voter(state, name).await,

        ClientMessage::CastVote {
            voter,
            category,
            candidate,
        } => voting::handle_cast_vote(state, voter, category, candidate).await,

        ClientMessage::AdvanceCategory { direction } => {
            voting::handle_advance_category(state, direction).await
        }

        ClientMessage::FinishVoting => voting::handle_finish_voting(state).await,

        ClientMessage::ShowResults => voting::handle_show_results(state).await,

        // Results
        ClientMessage::Tally { category } => results::handle_tally(state, category).await,

        ClientMessage::RevealNext => results::handle_reveal_next(state).await,

        ClientMessage::RevealPrev => results::handle_reveal_prev(state).await,

        ClientMessage::Reset => results::handle_reset(state).await,
    }
}
