// src/graph/mod.rs
//! The registry graph and its event-sourced builder.

pub mod builder;
pub mod kinds;
pub mod model;
pub mod names;
pub mod queries;

pub use builder::{BuilderConfig, EventEffect, GraphBuilder, ReplayOutcome, ReplayStats};
pub use kinds::{EdgeSemantics, NodeKey, NodeKind};
pub use model::{EdgeFlags, NodeId, PackageGraph};
