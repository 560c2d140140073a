//! # Tile Match Server
//!
//! Server-authoritative simulation for a match-3 tile game. Replays a
//! client's move list against a seeded board and computes the score the
//! server trusts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TILE MATCH SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - djb2 seed hash + Mulberry32 PRNG          │
//! │  └── hash.rs     - Board hashing for verification            │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── level.rs    - Validated level specification             │
//! │  ├── board.rs    - Grid, generation, gravity, refill         │
//! │  ├── matcher.rs  - Run detection                             │
//! │  ├── cascade.rs  - Combo loop and scoring                    │
//! │  ├── moves.rs    - Client moves and validation               │
//! │  ├── engine.rs   - Authoritative simulation                  │
//! │  └── hint.rs     - Scoring swap search                       │
//! │                                                              │
//! │  proof/          - Transcripts and replay verification       │
//! │  network/        - Wire types and request handlers           │
//! │  economy.rs      - Score to XP / currency                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic in tile draws
//! - No global or shared mutable state
//! - No system time dependencies
//! - All randomness from one seeded Mulberry32 stream per simulation
//!
//! Given identical inputs, a simulation produces **identical results** on
//! any platform, and any number of simulations may run in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod proof;
pub mod network;
pub mod economy;
pub mod config;

// Re-export commonly used types
pub use crate::core::rng::{DeterministicRng, seed_hash};
pub use game::level::{LevelSpec, LevelError};
pub use game::board::{Board, generate_board};
pub use game::moves::{Coord, Move};
pub use game::engine::{SimulationResult, SimulationReport, simulate, simulate_with};
pub use economy::{experience, currency_points, RewardDelta};
pub use config::EngineConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cap on processed moves per simulation.
pub const DEFAULT_MAX_MOVES: usize = 30;

/// Default safety ceiling on cascade passes per move.
pub const DEFAULT_MAX_CASCADE_PASSES: u32 = 256;
