//! Core data types shared by the pruning and display layers.

pub mod errors;
pub mod model;
