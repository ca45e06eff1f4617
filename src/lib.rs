// Crate entrypoint
pub mod config;     // file-backed render/logging policy
pub mod gen;        // synthetic CSV generator (stands in for lob_engine dumps)
pub mod loader;     // CSV -> typed rows
pub mod render;     // dashboard composition
pub mod telemetry;  // tracing setup
pub mod transform;  // rows -> drawable series
