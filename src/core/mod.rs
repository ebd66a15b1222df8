//! Core engine module - shared state, update stream, and scheduling loops

mod engine;
mod event_bus;
mod state;

pub use engine::{Engine, EngineHandle};
pub use event_bus::{EventBus, Update, UpdateKind};
pub use state::StateStore;
