// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{FormGraph, GraphIssue};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The file parsed but describes a graph that breaks structural invariants.
    Invalid {
        path: PathBuf,
        issues: Vec<GraphIssue>,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Invalid { path, issues } => {
                write!(f, "invalid form graph at {path:?}")?;
                for (index, issue) in issues.iter().enumerate() {
                    let sep = if index == 0 { ": " } else { "; " };
                    write!(f, "{sep}{issue}")?;
                }
                Ok(())
            }
            Self::SymlinkRefused { path } => write!(f, "refusing to write through symlink {path:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Invalid { .. } | Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place without fsync.
    #[default]
    BestEffort,

    /// Also flushes the file and, on unix, its directory entry.
    Durable,
}

/// A form graph persisted as one pretty-printed JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl GraphFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads and validates the graph.
    ///
    /// A file that parses but fails [`FormGraph::validate`] is refused with every issue listed.
    pub fn load(&self) -> Result<FormGraph, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let graph: FormGraph = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let issues = graph.validate();
        if !issues.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                issues = issues.len(),
                "refusing to load invalid form graph"
            );
            return Err(StoreError::Invalid {
                path: self.path.clone(),
                issues,
            });
        }

        tracing::debug!(path = %self.path.display(), steps = graph.len(), "form graph loaded");
        Ok(graph)
    }

    /// Validates `graph` and replaces the file atomically.
    pub fn save(&self, graph: &FormGraph) -> Result<(), StoreError> {
        let issues = graph.validate();
        if !issues.is_empty() {
            return Err(StoreError::Invalid {
                path: self.path.clone(),
                issues,
            });
        }

        let mut contents =
            serde_json::to_vec_pretty(graph).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        contents.push(b'\n');

        write_atomic(&self.path, &contents, self.durability)?;
        tracing::debug!(path = %self.path.display(), steps = graph.len(), "form graph saved");
        Ok(())
    }
}

// Atomic file replacement for graph files.
include!("graph_file/helpers.rs");
