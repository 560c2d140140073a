//! Request Boundary
//!
//! Wire types and handlers between a transport and the engine.
//! This layer is **non-deterministic** (it issues random seeds); all
//! scoring runs through `game/`.

pub mod protocol;

pub use protocol::{
    LevelRequest, LevelResponse, SubmitRequest, SubmitResponse, ProtocolError,
    decode_move, decode_moves, handle_level_request, handle_submission, issue_seed,
};
