//! Step definitions for dispatch registry behaviour scenarios.

mod then;
pub mod world;
