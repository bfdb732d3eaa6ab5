use super::{phase_message, AppState};
use crate::error::{SessionError, SessionResult};
use crate::protocol::{ResultCard, ServerMessage};
use crate::reveal::RevealSequencer;
use crate::types::*;

/// Log a rejected intent and pass the error through
fn rejected(intent: &str, err: SessionError) -> SessionError {
    tracing::warn!("Rejected {}: {}", intent, err);
    err
}

impl AppState {
    pub async fn add_participant(&self, name: &str) -> SessionResult<Vec<ParticipantName>> {
        let participants = self
            .session
            .write()
            .await
            .add_participant(name)
            .map_err(|e| rejected("add_participant", e))?;

        tracing::info!("Participant {:?} joined the party", name.trim());
        self.broadcast_to_all(ServerMessage::Roster {
            participants: participants.clone(),
        });
        Ok(participants)
    }

    /// Remove a participant along with their photo
    pub async fn remove_participant(&self, name: &str) -> SessionResult<Vec<ParticipantName>> {
        let mut session = self.session.write().await;
        let participants = session
            .remove_participant(name)
            .map_err(|e| rejected("remove_participant", e))?;

        self.photos.remove(name).await;
        drop(session);
        tracing::info!("Participant {:?} left the party", name);
        self.broadcast_to_all(ServerMessage::Roster {
            participants: participants.clone(),
        });
        Ok(participants)
    }

    pub async fn add_category(&self, name: &str) -> SessionResult<Vec<CategoryName>> {
        let categories = self
            .session
            .write()
            .await
            .add_category(name)
            .map_err(|e| rejected("add_category", e))?;

        tracing::info!("Category {:?} added", name.trim());
        self.broadcast_to_all(ServerMessage::Categories {
            categories: categories.clone(),
        });
        Ok(categories)
    }

    pub async fn remove_category(&self, name: &str) -> SessionResult<Vec<CategoryName>> {
        let categories = self
            .session
            .write()
            .await
            .remove_category(name)
            .map_err(|e| rejected("remove_category", e))?;

        tracing::info!("Category {:?} removed", name);
        self.broadcast_to_all(ServerMessage::Categories {
            categories: categories.clone(),
        });
        Ok(categories)
    }

    pub async fn start_voting(&self) -> SessionResult<Phase> {
        let mut session = self.session.write().await;
        let phase = session
            .start_voting()
            .map_err(|e| rejected("start_voting", e))?;

        tracing::info!(
            "Voting started with {} participants and {} categories",
            session.participants().len(),
            session.categories().len()
        );
        self.broadcast_to_all(phase_message(&session));
        Ok(phase)
    }

    pub async fn select_voter(&self, name: &str) -> SessionResult<Phase> {
        let mut session = self.session.write().await;
        let phase = session
            .select_voter(name)
            .map_err(|e| rejected("select_voter", e))?;

        tracing::info!("{} is voting", name);
        self.broadcast_to_all(phase_message(&session));
        Ok(phase)
    }

    /// Cast a vote and acknowledge it to every screen; returns the voter's
    /// progress afterwards
    pub async fn cast_vote(
        &self,
        voter: &str,
        category: &str,
        candidate: &str,
    ) -> SessionResult<Vec<CategoryProgress>> {
        let mut session = self.session.write().await;
        session
            .cast_vote(voter, category, candidate)
            .map_err(|e| rejected("cast_vote", e))?;

        tracing::debug!("{} voted in {:?}", voter, category);
        self.broadcast_to_all(ServerMessage::VoteAck {
            voter: voter.to_string(),
            category: category.to_string(),
            candidate: candidate.to_string(),
        });
        Ok(session.progress(voter))
    }

    pub async fn advance_category(&self, direction: Direction) -> SessionResult<Phase> {
        let mut session = self.session.write().await;
        let before = session.version();
        let phase = session
            .advance_category(direction)
            .map_err(|e| rejected("advance_category", e))?;

        if session.version() != before {
            self.broadcast_to_all(phase_message(&session));
        }
        Ok(phase)
    }

    pub async fn finish_voting(&self) -> SessionResult<Phase> {
        let mut session = self.session.write().await;
        let voter = match session.phase() {
            Phase::Voting { voter, .. } => Some(voter.clone()),
            _ => None,
        };
        let phase = session
            .finish_voting()
            .map_err(|e| rejected("finish_voting", e))?;

        let (voted, total) = session.voting_status();
        if let Some(voter) = voter {
            tracing::info!("{} finished voting ({} of {})", voter, voted, total);
        }
        if session.all_have_voted() {
            tracing::info!("Everyone has voted, results can be shown");
        }
        self.broadcast_to_all(phase_message(&session));
        Ok(phase)
    }

    /// Enter the results phase and arm the reveal sequence. Returns the
    /// result cards of the round that was just closed.
    pub async fn show_results(&self) -> SessionResult<Vec<ResultCard>> {
        let mut session = self.session.write().await;
        session
            .show_results()
            .map_err(|e| rejected("show_results", e))?;

        *self.reveal.write().await = Some(RevealSequencer::new(
            session.categories().len(),
            self.config.drumroll,
        ));

        tracing::info!("Showing results for {} categories", session.categories().len());
        self.broadcast_to_all(phase_message(&session));
        self.board_for(&session).await
    }

    /// Start over: empty roster, categories, ballots, voters and photos
    pub async fn reset(&self) -> Phase {
        let mut session = self.session.write().await;
        let phase = session.reset();
        *self.reveal.write().await = None;
        self.photos.clear().await;

        tracing::info!("Session reset, starting round {}", session.round_no());
        self.broadcast_to_all(phase_message(&session));
        self.broadcast_to_all(ServerMessage::Roster {
            participants: Vec::new(),
        });
        self.broadcast_to_all(ServerMessage::Categories {
            categories: Vec::new(),
        });
        phase
    }

    pub async fn tally(&self, category: &str) -> (TallyResult, Vec<Standing>) {
        let session = self.session.read().await;
        (session.tally(category), session.standings(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::PhotoRef;

    async fn ready_state() -> AppState {
        let state = AppState::new();
        state.add_participant("Ana").await.unwrap();
        state.add_participant("Leo").await.unwrap();
        state.add_category("Best Sweater").await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_add_participant_broadcasts_roster() {
        let state = AppState::new();
        let mut rx = state.broadcast.subscribe();

        let roster = state.add_participant(" Ana ").await.unwrap();
        assert_eq!(roster, vec!["Ana"]);

        match rx.recv().await.unwrap() {
            ServerMessage::Roster { participants } => assert_eq!(participants, vec!["Ana"]),
            other => panic!("Expected Roster, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_intent_does_not_broadcast() {
        let state = ready_state().await;
        let mut rx = state.broadcast.subscribe();

        assert!(state.add_participant("Ana").await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_participant_drops_photo() {
        let state = ready_state().await;
        let photo = PhotoRef::from_bytes("image/png", b"png", 1024).unwrap();
        state.photos.put("Ana", photo).await;

        state.remove_participant("Ana").await.unwrap();
        assert!(state.photos.get("Ana").await.is_none());
    }

    #[tokio::test]
    async fn test_cast_vote_returns_progress() {
        let state = ready_state().await;
        state.start_voting().await.unwrap();
        state.select_voter("Ana").await.unwrap();

        let mut rx = state.broadcast.subscribe();

        let progress = state.cast_vote("Ana", "Best Sweater", "Leo").await.unwrap();
        match rx.recv().await.unwrap() {
            ServerMessage::VoteAck { voter, candidate, .. } => {
                assert_eq!(voter, "Ana");
                assert_eq!(candidate, "Leo");
            }
            other => panic!("Expected VoteAck, got {:?}", other),
        }
        assert_eq!(
            progress,
            vec![CategoryProgress {
                category: "Best Sweater".to_string(),
                choice: Some("Leo".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_show_results_arms_reveal() {
        let state = ready_state().await;
        state.start_voting().await.unwrap();
        for voter in ["Ana", "Leo"] {
            state.select_voter(voter).await.unwrap();
            state.cast_vote(voter, "Best Sweater", "Leo").await.unwrap();
            state.finish_voting().await.unwrap();
        }

        let cards = state.show_results().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].winner_label, "Leo");
        assert_eq!(state.snapshot().await.phase, Phase::Results);
        let reveal = state.reveal.read().await;
        assert_eq!(reveal.as_ref().map(|r| r.total()), Some(1));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let state = ready_state().await;
        state.start_voting().await.unwrap();
        state
            .photos
            .put("Leo", PhotoRef::from_bytes("image/png", b"png", 1024).unwrap())
            .await;

        assert_eq!(state.reset().await, Phase::Setup);

        let snapshot = state.snapshot().await;
        assert!(snapshot.participants.is_empty());
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.voted.is_empty());
        assert!(state.photos.get("Leo").await.is_none());
        assert!(state.reveal.read().await.is_none());
    }

    #[tokio::test]
    async fn test_tally_reads_session() {
        let state = ready_state().await;
        let (result, standings) = state.tally("Best Sweater").await;

        assert_eq!(result.winner_label(), NO_VOTES_LABEL);
        assert!(standings.is_empty());
    }
}
