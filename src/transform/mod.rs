// Transform module entrypoint
pub mod types;    // raw row + derived series value types
pub mod depth;    // book rows -> cumulative depth curves + axis window
pub mod latency;  // latency samples -> percentile summary + display subset
pub mod trades;   // trade rows -> raw scatter or smoothed series
