//! Single-pass README synchronization.
//!
//! `run` reads the topic tree, renders the TOC, reads the document, splices
//! the TOC into the marked region and, only once the full new text exists in
//! memory, writes the document back.

use std::fs;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{parser, splice, toc};

/// What a run is allowed to do with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Rewrite the document when the region is out of date
    #[default]
    Write,
    /// Compare only, never write
    Check,
    /// Compute only; the caller prints `Report::toc`
    Print,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Unchanged,
    /// Check mode found a document that differs from the generated one
    Stale,
    Printed,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    pub entries: usize,
    /// The rendered TOC region
    pub toc: String,
}

/// Load the topic tree and render its TOC.
pub fn render_toc(config: &Config) -> Result<(usize, String)> {
    let xml = fs::read_to_string(&config.tree_path).map_err(|e| Error::io(&config.tree_path, e))?;
    let tree =
        parser::parse(&xml, &config.tree.element).map_err(|reason| Error::MalformedTree {
            path: config.tree_path.clone(),
            reason,
        })?;
    tracing::debug!(path = %config.tree_path.display(), topics = tree.topic_count(), "Tree loaded");

    let entries = toc::flatten(&tree, &config.link_style());
    tracing::debug!(entries = entries.len(), "Entries flattened");

    Ok((entries.len(), toc::render(&entries)))
}

/// Run one synchronization pass.
pub fn run(config: &Config, mode: Mode) -> Result<Report> {
    config.warn_suspicious();

    let (entries, toc) = render_toc(config)?;

    let document =
        fs::read_to_string(&config.doc_path).map_err(|e| Error::io(&config.doc_path, e))?;
    tracing::debug!(path = %config.doc_path.display(), bytes = document.len(), "Document read");

    let updated = splice::splice(&document, &config.start_marker, &config.end_marker, &toc)?;
    tracing::debug!("Region located");

    let outcome = match mode {
        Mode::Print => Outcome::Printed,
        _ if updated == document => Outcome::Unchanged,
        Mode::Check => Outcome::Stale,
        Mode::Write => {
            fs::write(&config.doc_path, &updated).map_err(|e| Error::io(&config.doc_path, e))?;
            tracing::info!(path = %config.doc_path.display(), entries, "Document written");
            Outcome::Updated
        }
    };

    Ok(Report {
        outcome,
        entries,
        toc,
    })
}
