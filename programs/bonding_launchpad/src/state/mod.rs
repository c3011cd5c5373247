//! State structures for the launchpad protocol

pub mod config;
pub mod curve;
pub mod launch;

pub use config::*;
pub use curve::*;
pub use launch::*;
