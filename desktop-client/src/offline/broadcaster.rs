use common::games::GameBroadcaster;
use common::games::snake::{GameEvent, GameOverSummary, SnakeSnapshot};
use common::log;
use crate::state::SharedState;

/// Publishes session output straight into the UI state.
#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: SnakeSnapshot, events: Vec<GameEvent>) {
        for event in &events {
            match event {
                GameEvent::BonusSpawned { at } => log!("Bonus appeared at ({}, {})", at.x, at.y),
                GameEvent::BonusExpired { at } => log!("Bonus at ({}, {}) expired", at.x, at.y),
                GameEvent::BonusEaten { score, .. } => log!("Bonus collected, score {}", score),
                _ => {}
            }
        }
        self.shared_state.update_snapshot(snapshot);
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        log!(
            "[{}] finished with {} points on level {}",
            summary.player_name,
            summary.score,
            summary.level
        );
    }
}
