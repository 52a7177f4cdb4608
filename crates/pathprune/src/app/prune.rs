//! Reduction of a [`PathSet`] to its minimal covering set.
//!
//! Both passes follow the same shape: every candidate is classified once, tested against every
//! anchor directory, and kept only when no anchor covers it. Pass one uses the directory list as
//! both anchors and candidates; pass two tests the file list against the surviving directories.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{ParseError, PruneError};
use crate::domain::model::{EntryKind, PathSet};
use crate::infra::fs::{self, Classify, FsClassifier};

/// How an anchor directory decides whether it covers another path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Plain string-prefix matching. `/data/log` covers `/data/logs`.
    #[default]
    Literal,
    /// Component-wise matching. `/data/log` covers `/data/log/x` but not `/data/logs`.
    Segment,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Literal => "literal",
            MatchMode::Segment => "segment",
        }
    }
}

impl FromStr for MatchMode {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" | "prefix" => Ok(MatchMode::Literal),
            "segment" | "component" => Ok(MatchMode::Segment),
            other => Err(ParseError::UnknownMatchMode(other.to_string())),
        }
    }
}

/// Entry counts observed around a prune.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub directories_before: usize,
    pub directories_after: usize,
    pub files_before: usize,
    pub files_after: usize,
}

impl PruneSummary {
    fn unchanged(set: &PathSet) -> Self {
        Self {
            directories_before: set.directories().len(),
            directories_after: set.directories().len(),
            files_before: set.files().len(),
            files_after: set.files().len(),
        }
    }

    /// Total number of entries dropped from both lists.
    pub fn removed(&self) -> usize {
        (self.directories_before - self.directories_after) + (self.files_before - self.files_after)
    }
}

/// Runs the two-pass prune with a configurable [`MatchMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pruner {
    mode: MatchMode,
}

impl Pruner {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Prune `set` in place, classifying candidates through `classifier`.
    ///
    /// Returns immediately when there are no directories. On error the lists are left exactly as
    /// they were.
    pub fn prune<C>(&self, set: &mut PathSet, classifier: &C) -> Result<PruneSummary, PruneError>
    where
        C: Classify + ?Sized,
    {
        if set.directories().is_empty() {
            tracing::debug!("no directories listed; nothing to prune");
            return Ok(PruneSummary::unchanged(set));
        }

        let anchors = set
            .directories()
            .iter()
            .map(|dir| Anchor::new(dir, self.mode))
            .collect::<Result<Vec<_>, _>>()?;

        let keep_dirs = keep_mask(&anchors, set.directories(), classifier)?;
        let survivors: Vec<Anchor> = anchors
            .into_iter()
            .zip(&keep_dirs)
            .filter_map(|(anchor, keep)| keep.then_some(anchor))
            .collect();
        let keep_files = keep_mask(&survivors, set.files(), classifier)?;

        let directories = retain(set.directories(), &keep_dirs, "directory");
        let files = retain(set.files(), &keep_files, "file");

        let summary = PruneSummary {
            directories_before: set.directories().len(),
            directories_after: directories.len(),
            files_before: set.files().len(),
            files_after: files.len(),
        };

        set.set_directories(directories);
        set.set_files(files);

        tracing::info!(
            mode = self.mode.as_str(),
            directories = summary.directories_after,
            files = summary.files_after,
            removed = summary.removed(),
            "pruned path set"
        );
        Ok(summary)
    }
}

impl PathSet {
    /// Reduce both lists to the minimal covering set, classifying entries against the host
    /// filesystem with literal prefix matching.
    ///
    /// Every listed path must exist; the first missing one aborts with [`PruneError::NotFound`].
    pub fn prune(&mut self) -> Result<PruneSummary, PruneError> {
        Pruner::default().prune(self, &FsClassifier)
    }

    /// Same as [`PathSet::prune`] but with a caller-supplied classifier.
    pub fn prune_with<C>(&mut self, classifier: &C) -> Result<PruneSummary, PruneError>
    where
        C: Classify + ?Sized,
    {
        Pruner::default().prune(self, classifier)
    }
}

/// A listed directory, resolved and prepared for ancestor tests.
#[derive(Debug)]
enum Anchor {
    Literal { exact: Regex, descendant: Regex },
    Segment { root: PathBuf },
}

impl Anchor {
    fn new(raw: &str, mode: MatchMode) -> Result<Self, PruneError> {
        let resolved = fs::resolve(raw).map_err(|err| PruneError::from_io(raw, err))?;
        match mode {
            MatchMode::Literal => {
                let escaped = regex::escape(&resolved.to_string_lossy());
                Ok(Anchor::Literal {
                    exact: Regex::new(&format!("^{escaped}"))?,
                    descendant: Regex::new(&format!("^{escaped}.+"))?,
                })
            }
            MatchMode::Segment => Ok(Anchor::Segment { root: resolved }),
        }
    }

    /// `path` is the anchor itself or lies below it.
    fn covers(&self, path: &Path) -> bool {
        match self {
            Anchor::Literal { exact, .. } => exact.is_match(&path.to_string_lossy()),
            Anchor::Segment { root } => path.starts_with(root),
        }
    }

    /// `path` lies strictly below the anchor.
    fn strictly_covers(&self, path: &Path) -> bool {
        match self {
            Anchor::Literal { descendant, .. } => descendant.is_match(&path.to_string_lossy()),
            Anchor::Segment { root } => path != root && path.starts_with(root),
        }
    }
}

#[derive(Debug)]
struct Candidate {
    resolved: PathBuf,
    kind: EntryKind,
}

impl Candidate {
    fn classify<C>(raw: &str, classifier: &C) -> Result<Self, PruneError>
    where
        C: Classify + ?Sized,
    {
        let resolved = fs::resolve(raw).map_err(|err| PruneError::from_io(raw, err))?;
        let kind = classifier.classify(&resolved)?;
        Ok(Self { resolved, kind })
    }

    fn is_covered_by(&self, anchor: &Anchor) -> bool {
        match self.kind {
            EntryKind::File => anchor.covers(fs::parent_dir(&self.resolved)),
            EntryKind::Directory => anchor.strictly_covers(&self.resolved),
        }
    }
}

fn keep_mask<C>(
    anchors: &[Anchor],
    candidates: &[String],
    classifier: &C,
) -> Result<Vec<bool>, PruneError>
where
    C: Classify + ?Sized,
{
    candidates
        .iter()
        .map(|raw| {
            let candidate = Candidate::classify(raw, classifier)?;
            Ok(!anchors.iter().any(|anchor| candidate.is_covered_by(anchor)))
        })
        .collect()
}

fn retain(entries: &[String], keep: &[bool], label: &str) -> Vec<String> {
    entries
        .iter()
        .zip(keep)
        .filter_map(|(entry, keep)| {
            if *keep {
                Some(entry.clone())
            } else {
                tracing::debug!(kind = label, path = %entry, "dropping covered entry");
                None
            }
        })
        .collect()
}
