//! Session State
//!
//! Small pieces of state that outlive a single stage: the music position and
//! whether the user left with the pause key. A [`SessionState`] is created
//! when a stage mounts and dropped with it; the [`KeyValueStore`] underneath
//! decides where the values actually live.

pub mod state;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use state::{SessionChange, SessionKey, SessionState, SubscriptionId};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;
