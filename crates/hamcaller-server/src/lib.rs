pub mod classify;
pub mod cli;
pub mod config;
pub mod report;
pub mod samples;
pub mod server;
pub mod state;
pub mod telemetry;

pub use cli::*;
pub use config::*;
pub use server::*;
pub use state::*;
