use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::game_state::{GameOverSummary, SnakeGameState};
use super::settings::SnakeSettings;
use super::types::Direction;

#[derive(Clone)]
pub struct SnakeSessionState {
    pub game_state: Arc<Mutex<SnakeGameState>>,
    pub rng: Arc<Mutex<SessionRng>>,
    pub tick_interval: Duration,
    pub frame_interval: Duration,
}

impl SnakeSessionState {
    /// Builds a running game for `player_name`. Fails on invalid settings.
    pub fn create(settings: &SnakeSettings, player_name: &str, seed: u64) -> Result<Self, String> {
        let mut rng = SessionRng::new(seed);
        let mut game_state = SnakeGameState::new(settings.clone());
        game_state.start(player_name, &mut rng)?;

        Ok(Self::from_parts(game_state, rng))
    }

    pub fn from_parts(game_state: SnakeGameState, rng: SessionRng) -> Self {
        let tick_interval = game_state.settings().tick_interval();
        let frame_interval = game_state.settings().frame_interval();
        Self {
            game_state: Arc::new(Mutex::new(game_state)),
            rng: Arc::new(Mutex::new(rng)),
            tick_interval,
            frame_interval,
        }
    }
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives a run until it ends. Movement follows the tick clock, timers
    /// and particles follow the frame clock; both mutate the same state and
    /// each step completes under the lock before the next one starts.
    pub async fn run(
        session_state: SnakeSessionState,
        broadcaster: impl GameBroadcaster,
    ) -> GameOverSummary {
        let start = Instant::now();
        let mut tick_timer = interval_at(start + session_state.tick_interval, session_state.tick_interval);
        let mut frame_timer = interval_at(start + session_state.frame_interval, session_state.frame_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let (snapshot, events, summary) = tokio::select! {
                _ = tick_timer.tick() => {
                    let mut game_state = session_state.game_state.lock().await;
                    let mut rng = session_state.rng.lock().await;
                    let events = game_state.tick(&mut rng);
                    (game_state.snapshot(), events, game_state.summary())
                }
                _ = frame_timer.tick() => {
                    let mut game_state = session_state.game_state.lock().await;
                    let mut rng = session_state.rng.lock().await;
                    let events = game_state.frame(&mut rng);
                    (game_state.snapshot(), events, game_state.summary())
                }
            };

            broadcaster.broadcast_state(snapshot, events).await;

            if let Some(summary) = summary {
                broadcaster.broadcast_game_over(summary.clone()).await;
                return summary;
            }
        }
    }

    /// Only buffers the direction; the next tick applies it.
    pub async fn handle_direction(state: &SnakeSessionState, direction: Direction) {
        let mut game_state = state.game_state.lock().await;
        if let Err(e) = game_state.set_direction(direction) {
            log!("[{}] turn ignored: {}", game_state.player_name(), e);
        }
    }
}
