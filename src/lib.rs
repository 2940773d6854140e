//! Switchyard: a table-driven finite state machine
//!
//! States and events are Rust types ("kinds"). A transition table is an
//! ordered list of `(from, event) -> (to, handler)` rows declared up front;
//! the machine tracks one current state and, for each event, scans the table
//! in declaration order, moving to the target state of every matching row
//! and running its handler.
//!
//! # Core Concepts
//!
//! - **Kinds**: state and event types, identified by a stable `KindId`
//! - **Transition table**: read-only rows, order preserved
//! - **State machine**: current state, `start`/`stop`, `process_event`
//! - **Environment**: caller-owned context every handler receives
//!
//! # Example
//!
//! ```rust
//! use switchyard::{kinds, StateMachineBuilder};
//!
//! kinds! {
//!     struct MainMenu;
//!     struct Loading;
//!     struct LoadGame;
//! }
//!
//! let mut machine = StateMachineBuilder::<String>::new()
//!     .initial::<MainMenu>()
//!     .transition::<MainMenu, LoadGame, Loading>(|_, screen| {
//!         *screen = "LOADING_SCREEN".to_string();
//!     })
//!     .build()
//!     .unwrap();
//!
//! machine.start();
//! machine.process_event(&LoadGame);
//!
//! assert!(machine.is_in::<Loading>());
//! assert_eq!(machine.env(), "LOADING_SCREEN");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dispatch;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionTableBuilder};
pub use config::{DispatchPolicy, HistoryPolicy, MachineConfig};
pub use crate::core::{identity_of, Kind, KindId, TransitionHistory, TransitionRecord};
pub use dispatch::{Lifecycle, StateMachine, Transition, TransitionTable};
