pub mod centrality;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod events;
pub mod exit;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod telemetry;
pub mod trend;
