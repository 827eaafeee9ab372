//! # Hydrate Core Library
//!
//! Core business logic for the Hydrate water tracker. The library is
//! CLI-first: every operation is available through the standalone binary,
//! and any GUI is a thin presentation layer over the same store.
//!
//! ## Architecture
//!
//! - **Intake Store**: single-owner state machine over today's log
//!   entries and the goal configuration; every mutating command emits
//!   exactly one event
//! - **Tilt Simulator**: a spring-damper system converting an orientation
//!   signal into smoothed tilt and agitation values, ticked at frame rate
//! - **Storage**: SQLite-backed key-value persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`IntakeStore`]: intake state and command handling
//! - [`TiltSimulator`]: pure per-tick spring step
//! - [`MotionRunner`]: live tokio tick loop publishing snapshots
//! - [`Database`]: durable record persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod feedback;
pub mod intake;
pub mod motion;
pub mod storage;

pub use error::{ConfigError, CoreError, PersistenceError, Result, StoreError};
pub use events::Event;
pub use feedback::{FeedbackSink, NullFeedback, RecordingFeedback};
pub use intake::{GoalConfig, IntakeStore, LogEntry, DEFAULT_DAILY_GOAL, MILESTONES};
pub use motion::{
    FixedOrientation, MotionRunner, NeutralOrientation, OrientationSource, SimulationState,
    SyntheticOrientation, TiltSimulator,
};
pub use storage::{Config, Database, MemoryStorage, Persistence};
