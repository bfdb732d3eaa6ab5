use super::AppState;
use crate::error::{SessionError, SessionResult};
use crate::protocol::{ResultCard, ServerMessage};
use crate::reveal::{RevealSequencer, RevealStage};
use crate::session::Session;
use crate::types::*;
use std::time::Instant;

const RESULTS_NOT_READY: &str = "Results are available once everyone has voted";

impl AppState {
    /// Attach the winner's photo (if any) to a tally
    async fn result_card(
        &self,
        number: usize,
        category: CategoryName,
        result: TallyResult,
    ) -> ResultCard {
        let winner_photo = match &result.winner {
            Some(winner) => self.photos.get(winner).await,
            None => None,
        };
        ResultCard {
            number,
            category,
            winner_label: result.winner_label().to_string(),
            result,
            winner_photo,
        }
    }

    /// Every category's result card, in category order
    pub async fn results_board(&self) -> SessionResult<Vec<ResultCard>> {
        let session = self.session.read().await;
        self.board_for(&session).await
    }

    /// Cards for a session the caller already holds a lock on
    pub(super) async fn board_for(&self, session: &Session) -> SessionResult<Vec<ResultCard>> {
        if *session.phase() != Phase::Results {
            return Err(SessionError::precondition(RESULTS_NOT_READY));
        }

        let tallies = session.tally_all();
        let mut cards = Vec::with_capacity(tallies.len());
        for (i, (category, result)) in tallies.into_iter().enumerate() {
            cards.push(self.result_card(i + 1, category, result).await);
        }
        Ok(cards)
    }

    pub async fn reveal_next(&self) -> SessionResult<ServerMessage> {
        self.step_reveal(|reveal| reveal.next(Instant::now())).await
    }

    pub async fn reveal_prev(&self) -> SessionResult<ServerMessage> {
        self.step_reveal(|reveal| reveal.prev()).await
    }

    /// Finish an expired drumroll. Returns the update to broadcast, if any.
    pub async fn tick_reveal(&self) -> Option<ServerMessage> {
        let (category, result, reveal) = {
            let session = self.session.read().await;
            let mut guard = self.reveal.write().await;
            let reveal = guard.as_mut()?;
            if !reveal.tick(Instant::now()) {
                return None;
            }
            let category = session.categories().get(reveal.index())?.clone();
            let result = session.tally(&category);
            (category, result, reveal.clone())
        };

        tracing::debug!("Drumroll over for {:?}", category);
        Some(self.reveal_update(&reveal, category, result).await)
    }

    async fn step_reveal<F>(&self, step: F) -> SessionResult<ServerMessage>
    where
        F: FnOnce(&mut RevealSequencer) -> bool,
    {
        let (changed, category, result, reveal) = {
            let session = self.session.read().await;
            let mut guard = self.reveal.write().await;
            let reveal = guard
                .as_mut()
                .ok_or_else(|| SessionError::precondition(RESULTS_NOT_READY))?;
            let changed = step(reveal);
            let category = session
                .categories()
                .get(reveal.index())
                .cloned()
                .ok_or_else(|| SessionError::precondition("There are no categories to reveal"))?;
            let result = session.tally(&category);
            (changed, category, result, reveal.clone())
        };

        let update = self.reveal_update(&reveal, category, result).await;
        if changed {
            tracing::info!(
                "Reveal {}/{}: {:?}",
                reveal.index() + 1,
                reveal.total(),
                reveal.stage()
            );
            self.broadcast_to_all(update.clone());
        }
        Ok(update)
    }

    async fn reveal_update(
        &self,
        reveal: &RevealSequencer,
        category: CategoryName,
        result: TallyResult,
    ) -> ServerMessage {
        let card = if reveal.stage() == RevealStage::Revealed {
            Some(self.result_card(reveal.index() + 1, category.clone(), result).await)
        } else {
            None
        };
        ServerMessage::RevealUpdate {
            index: reveal.index(),
            total: reveal.total(),
            category,
            stage: reveal.stage(),
            card,
            finished: reveal.is_finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::photo::PhotoRef;
    use std::time::Duration;

    async fn finished_state(drumroll: Duration) -> AppState {
        let state = AppState::with_config(AppConfig {
            drumroll,
            ..AppConfig::default()
        });
        for name in ["Ana", "Leo", "Mia"] {
            state.add_participant(name).await.unwrap();
        }
        state.add_category("Best Sweater").await.unwrap();
        state.add_category("Best Cook").await.unwrap();
        state.start_voting().await.unwrap();

        let ballots = [("Ana", "Leo", "Mia"), ("Leo", "Leo", "Ana"), ("Mia", "Ana", "Ana")];
        for (voter, sweater, cook) in ballots {
            state.select_voter(voter).await.unwrap();
            state.cast_vote(voter, "Best Sweater", sweater).await.unwrap();
            state.advance_category(Direction::Next).await.unwrap();
            state.cast_vote(voter, "Best Cook", cook).await.unwrap();
            state.finish_voting().await.unwrap();
        }
        state.show_results().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_results_board_requires_results_phase() {
        let state = AppState::new();
        let err = state.results_board().await.unwrap_err();
        assert_eq!(err.code(), "PRECONDITION_FAILED");

        assert!(state.reveal_next().await.is_err());
    }

    #[tokio::test]
    async fn test_results_board_includes_winner_photo() {
        let state = finished_state(Duration::from_secs(3)).await;
        let photo = PhotoRef::from_bytes("image/jpeg", &[0xFF, 0xD8], 1024).unwrap();
        state.photos.put("Leo", photo.clone()).await;

        let cards = state.results_board().await.unwrap();
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].number, 1);
        assert_eq!(cards[0].category, "Best Sweater");
        assert_eq!(cards[0].winner_label, "Leo");
        assert_eq!(cards[0].result.winner_count, 2);
        assert_eq!(cards[0].result.runner_up.as_deref(), Some("Ana"));
        assert_eq!(cards[0].winner_photo, Some(photo));

        assert_eq!(cards[1].winner_label, "Ana");
        assert_eq!(cards[1].result.winner_count, 2);
        assert_eq!(cards[1].winner_photo, None);
    }

    #[tokio::test]
    async fn test_reveal_walk_hides_winner_during_drumroll() {
        let state = finished_state(Duration::from_secs(60)).await;

        match state.reveal_next().await.unwrap() {
            ServerMessage::RevealUpdate {
                index, stage, card, ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(stage, RevealStage::Drumroll);
                assert!(card.is_none());
            }
            other => panic!("Expected RevealUpdate, got {:?}", other),
        }

        match state.reveal_next().await.unwrap() {
            ServerMessage::RevealUpdate {
                stage, card, finished, ..
            } => {
                assert_eq!(stage, RevealStage::Revealed);
                assert_eq!(card.unwrap().winner_label, "Leo");
                assert!(!finished);
            }
            other => panic!("Expected RevealUpdate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tick_reveals_after_drumroll() {
        let state = finished_state(Duration::ZERO).await;
        assert!(state.tick_reveal().await.is_none());

        state.reveal_next().await.unwrap();
        match state.tick_reveal().await {
            Some(ServerMessage::RevealUpdate { stage, card, .. }) => {
                assert_eq!(stage, RevealStage::Revealed);
                assert!(card.is_some());
            }
            other => panic!("Expected RevealUpdate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reveal_does_not_change_ballots() {
        let state = finished_state(Duration::ZERO).await;
        let before = state.results_board().await.unwrap();

        for _ in 0..5 {
            state.reveal_next().await.unwrap();
        }
        state.reveal_prev().await.unwrap();

        assert_eq!(state.results_board().await.unwrap(), before);
    }
}
