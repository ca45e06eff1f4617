// Render module entrypoint
pub mod dashboard;  // lays out the three panels and writes the PNG
pub mod theme;      // palette passed into the composer, no global style state
