use std::future::Future;

use super::snake::{GameEvent, GameOverSummary, SnakeSnapshot};

/// Receives what a running session produces: a snapshot after every
/// simulation step and one summary when the run ends.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(
        &self,
        snapshot: SnakeSnapshot,
        events: Vec<GameEvent>,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}
