//! `il-core`: foundational types for the interlocking engine.
//!
//! This crate is a dependency of every other `il-*` crate.  It has no `il-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `SectionId`, `TrainIdx`, `TrainId`                    |
//! | [`line`]  | `Line`, `Direction`                                   |
//! | [`time`]  | `Tick`                                                |
//! | [`error`] | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod line;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{SectionId, TrainId, TrainIdx};
pub use line::{Direction, Line};
pub use time::Tick;

/// Position reported for a train that has exited or was never admitted.
pub const EXITED: i64 = -1;
