//! Status effects (berserk, shield, life drain, guaranteed critical).

pub mod logic;
pub mod types;

pub use types::*;
