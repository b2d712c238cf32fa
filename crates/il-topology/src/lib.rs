//! `il-topology`: static track plan and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `Topology` (CSR adjacency), `TopologyBuilder`, `Crossing`   |
//! | [`layout`]  | `Layout` plain-data track plan, `Layout::junction()`        |
//! | [`router`]  | `Router` trait, `Route`, `BfsRouter`                        |
//! | [`error`]   | `TopologyError`, `TopologyResult<T>`                        |
//!
//! The topology is loaded once and never mutated.  Every query is total:
//! an unknown section simply has no line, no neighbours, and no entry/exit
//! classification.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                         |
//! |-----------|----------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Layout` and `Crossing`.  |
//! | `fx-hash` | Uses `FxHashMap` for the section index and BFS parent map.     |

pub mod error;
pub mod layout;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

pub use error::{TopologyError, TopologyResult};
pub use layout::Layout;
pub use network::{Crossing, Topology, TopologyBuilder};
pub use router::{BfsRouter, Route, Router};
