use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// How often the reveal ticker checks for a finished drumroll
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Spawn a background task that ends each category's drumroll once its
/// configured duration has passed and broadcasts the revealed winner.
pub fn spawn_reveal_ticker(state: Arc<AppState>) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;

            if let Some(update) = state.tick_reveal().await {
                state.broadcast_to_all(update);
            }
        }
    });
}
