//! Application layer: pruning, manifests, and report rendering.

pub mod manifest;
pub mod prune;
pub mod report;
