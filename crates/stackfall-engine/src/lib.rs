pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("move rejected: blocked, paused or game over")]
pub struct MoveRejected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({col}, {row}) lies outside the field")]
pub struct CellOutOfField {
    pub col: i32,
    pub row: i32,
}
