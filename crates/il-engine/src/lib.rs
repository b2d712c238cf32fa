//! `il-engine`: tick scheduler and conflict resolver for the interlocking.
//!
//! # One tick
//!
//! ```text
//! move_trains(ids):
//!   1. Request   resolve names, drop unknown / exited / repeated ids.
//!   2. Resolve   exits, router proposals, crossing yield, swaps, then
//!                the availability fixpoint (see `resolve`).
//!   3. Commit    Registry::commit applies every exit and move at once.
//!   4. Report    TickReport to the observer; changed() is the result.
//! ```
//!
//! # Crate layout
//!
//! | Module           | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | [`interlocking`] | `Interlocking` facade                             |
//! | [`builder`]      | `InterlockingBuilder`                             |
//! | [`report`]       | `TickReport`, `TrainMove`, `TrainExit`, `Held`    |
//! | [`observer`]     | `TickObserver`, `NoopObserver`                    |
//! | [`shared`]       | `SharedInterlocking` (mutex-guarded handle)       |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash for the registry and the per-tick resolver maps. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use il_engine::Interlocking;
//! use il_topology::Layout;
//!
//! let mut il = Interlocking::new(Layout::junction().build()?);
//! assert!(il.add_train("P1", 1, 9));
//! assert_eq!(il.move_trains(["P1"]), 1);
//! assert_eq!(il.get_train("P1"), 5);
//! ```

pub mod builder;
pub mod error;
pub mod interlocking;
pub mod observer;
pub mod report;
pub mod shared;

mod resolve;


pub use builder::InterlockingBuilder;
pub use error::{EngineError, EngineResult};
pub use interlocking::Interlocking;
pub use observer::{NoopObserver, TickObserver};
pub use report::{Held, HoldReason, TickReport, TrainExit, TrainMove};
pub use shared::SharedInterlocking;

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
pub(crate) type Set<T> = rustc_hash::FxHashSet<T>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type Set<T> = std::collections::HashSet<T>;
