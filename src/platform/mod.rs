//! Platform abstraction layer
//!
//! The simulation owns pure entity data; rendering resources live here in a
//! table keyed by entity id, synced once per frame.
//! - `handles`: generic entity → render handle table
//! - `dom` (web only): DOM presenter for entities, HUD and game over screen

pub mod handles;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use handles::HandleTable;
