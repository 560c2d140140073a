//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `level`: Validated level specification
//! - `board`: Tile grid, initial generation, gravity and refill
//! - `matcher`: Run detection
//! - `cascade`: Clear/gravity/refill loop and combo scoring
//! - `moves`: Client moves and validation
//! - `engine`: Authoritative simulation over a move list
//! - `hint`: Scoring swap search
//! - `events`: Simulation events for replay/inspection

pub mod level;
pub mod board;
pub mod matcher;
pub mod cascade;
pub mod moves;
pub mod engine;
pub mod hint;
pub mod events;

// Re-export key types
pub use level::{LevelSpec, LevelError};
pub use board::{Board, BoardError, Tile, generate_board};
pub use matcher::{MatchMask, find_matches};
pub use cascade::{CascadeOutcome, resolve_cascade};
pub use moves::{Coord, Move, RejectReason};
pub use engine::{SimulationResult, SimulationReport, simulate, simulate_with};
pub use hint::legal_swaps;
pub use events::SimEvent;
