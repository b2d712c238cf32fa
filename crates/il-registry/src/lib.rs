//! `il-registry`: train records and section occupancy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`store`]     | `TrainStore` (SoA arrays indexed by `TrainIdx`)          |
//! | [`occupancy`] | `Occupancy` (section → train)                            |
//! | [`registry`]  | `Registry` (admission, atomic commit, consistency check) |
//! | [`error`]     | `AdmissionError`, `RegistryError`                        |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Use `FxHashMap` for the id index and occupancy table.      |

pub mod error;
pub mod occupancy;
pub mod registry;
pub mod store;


pub use error::{AdmissionError, RegistryError, RegistryResult};
pub use occupancy::Occupancy;
pub use registry::Registry;
pub use store::{TrainStatus, TrainStore};

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;
