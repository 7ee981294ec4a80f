//! Error types for graph loading.
//!
//! Every error aborts the load: no partially built graph is ever returned.

use std::path::PathBuf;

use thiserror::Error;

use crate::labels::VertexId;

/// Errors that can occur while reading or building a host graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph file could not be read.
    #[error("failed to read graph file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A record is malformed (missing fields, bad tokens, unknown record type).
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the record.
        message: String,
    },

    /// The same vertex id was declared twice.
    #[error("duplicate vertex id {id}{}", at_line(.line))]
    DuplicateVertex {
        /// Offending id.
        id: VertexId,
        /// 1-based line number, if the graph came from a text source.
        line: Option<usize>,
    },

    /// An edge references a vertex id that was never declared.
    #[error("edge references undeclared vertex id {id}{}", at_line(.line))]
    UndeclaredVertex {
        /// Offending id.
        id: VertexId,
        /// 1-based line number, if the graph came from a text source.
        line: Option<usize>,
    },

    /// Vertex ids do not form the dense range `0..n`.
    #[error("vertex ids must be dense: id {id} is missing from 0..{count}")]
    MissingVertex {
        /// First id absent from the range.
        id: VertexId,
        /// Number of declared vertices.
        count: usize,
    },

    /// Labels of one kind mix integer and non-integer tokens.
    #[error("inconsistent {what} label types: integer label {integer:?} mixed with text label {text:?}")]
    InconsistentLabels {
        /// `"vertex"` or `"edge"`.
        what: &'static str,
        /// An integer token found in the table.
        integer: String,
        /// A non-integer token found in the table.
        text: String,
    },

    /// The source describes more than one graph.
    #[error("line {line}: only a single graph per source is supported")]
    MultipleGraphs {
        /// 1-based line number of the second graph header.
        line: usize,
    },

    /// The graph has more vertices than a [`VertexId`] can address.
    #[error("too many vertices: {0}")]
    TooManyVertices(usize),
}

impl GraphError {
    /// Create a syntax error.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the content of the graph source.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|line| format!(" (line {line})")).unwrap_or_default()
}
