//! # Momentum Core Library
//!
//! Core business logic for the Momentum habit tracker. All operations are
//! available through a standalone CLI binary; any GUI would be a thin layer
//! over this same library.
//!
//! ## Architecture
//!
//! - **Core functions**: three pure leaves -- deadline evaluation, streak
//!   advancement, progress projection -- consumed by the state holder
//! - **Tracker**: single-writer owner of the action/goal/category/reward
//!   collections; every mutation emits events and saves through the
//!   storage port
//! - **Storage**: SQLite key-value store for state, TOML for configuration
//! - **Auth**: optional remote identity service client behind a port trait
//! - **Suggest**: remote-or-heuristic suggestion strategies
//!
//! ## Key Components
//!
//! - [`Tracker`]: state holder and operation surface
//! - [`storage::KvDatabase`]: default storage port implementation
//! - [`storage::Config`]: application configuration
//! - [`suggest::SuggestionEngine`]: strategy selector for suggestions

pub mod auth;
pub mod deadlines;
pub mod error;
pub mod events;
pub mod model;
pub mod progress;
pub mod rewards;
pub mod storage;
pub mod streak;
pub mod suggest;
pub mod tracker;

pub use deadlines::OverdueReport;
pub use error::{AuthError, ConfigError, CoreError, StorageError, SuggestError, ValidationError};
pub use events::Event;
pub use model::{Action, Category, Goal, Reward, Streak};
pub use storage::{Config, KvDatabase, StateStore};
pub use tracker::{NewAction, NewGoal, Tracker};
