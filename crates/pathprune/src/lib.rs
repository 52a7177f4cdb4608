pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub use app::prune::{MatchMode, PruneSummary, Pruner};
pub use domain::errors::PruneError;
pub use domain::model::{EntryKind, PathSet};

pub fn init(verbosity: u8) {
    infra::logging::init(verbosity);
}
