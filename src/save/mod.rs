//! Save-state record and the checksummed file adapter used by hosts.

pub mod manager;
pub mod record;

pub use manager::SaveManager;
pub use record::{merge_json, SaveState};
