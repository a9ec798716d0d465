//! Match simulation
//!
//! All gameplay logic lives here, advanced one fixed tick at a time:
//! - Fixed timestep only; speeds are court units per tick
//! - Serve direction comes from a seeded RNG
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, Contact, Wall, WallOutcome, advance_puck, bounce_off_wall, is_goal,
    mallet_puck_collision, resolve_mallet_hit, wall_contact,
};
pub use state::{
    Bounds, ClockTick, Controls, EndReason, GameEvent, GameState, Mallet, MatchPhase, MatchRules,
    Outcome, Puck, SessionClock, Side, Steer, format_clock,
};
pub use tick::{TickInput, tick};
