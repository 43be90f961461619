// src/lib.rs

pub mod api;
pub mod complete;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod runtime;

// Re-export the main entry points for convenience
pub use api::{HttpApi, QueryBenchApi};
pub use complete::Completer;
pub use gate::SolutionGate;
pub use runtime::AttemptRuntime;
