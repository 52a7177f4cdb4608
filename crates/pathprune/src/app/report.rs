//! Rendering of path sets for display.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ParseError;
use crate::domain::model::PathSet;

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// One entry per line under `directories:` and `files:` headings.
    #[default]
    Plain,
    /// Pretty-printed JSON object, readable back as a manifest.
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Plain => "plain",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(ReportFormat::Plain),
            "json" => Ok(ReportFormat::Json),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `set` in the requested format. The output always ends with a newline.
pub fn render(set: &PathSet, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Plain => Ok(render_plain(set)),
        ReportFormat::Json => {
            let mut rendered =
                serde_json::to_string_pretty(set).context("failed to serialize path set")?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

fn render_plain(set: &PathSet) -> String {
    let mut out = String::new();
    push_section(&mut out, "directories", set.directories());
    push_section(&mut out, "files", set.files());
    out
}

fn push_section(out: &mut String, heading: &str, entries: &[String]) {
    let _ = writeln!(out, "{heading}:");
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for entry in entries {
        let _ = writeln!(out, "  {entry}");
    }
}
