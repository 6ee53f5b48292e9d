mod game_state;
mod grid;
mod particles;
mod placement;
mod progression;
mod session;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use game_state::{BonusItem, GameEvent, GameOverSummary, SnakeGameState};
pub use grid::{resolve_boundary, Boundary, FieldSize, WallPolicy};
pub use particles::{Particle, ParticleField, ParticleKind, MAX_PARTICLES};
pub use placement::{PlacementError, PlacementRequest};
pub use progression::{obstacle_count_for_level, Progression, WallStage};
pub use session::{SnakeSession, SnakeSessionState};
pub use settings::SnakeSettings;
pub use snake::Snake;
pub use snapshot::{BonusSnapshot, SnakeSnapshot};
pub use types::{Axis, Direction, GameEndReason, Point, RunPhase};
