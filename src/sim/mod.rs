//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Variable timestep, clamped by the caller
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState, Hazard, Pickup, PickupKind, Player, Pulse};
pub use tick::tick;
