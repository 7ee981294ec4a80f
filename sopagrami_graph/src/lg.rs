//! Reader for the line-based `.lg` graph format.
//!
//! ```text
//! # comment
//! t # 0
//! v <id> <label>
//! e <src> <dst> [<label>]
//! ```
//!
//! The `t` header is optional and may appear once, before any record.

use crate::builder::GraphBuilder;
use crate::error::GraphError;
use crate::labels::VertexId;

/// Parses `.lg` text into a builder. Validation of ids and labels happens in
/// [`GraphBuilder::build`].
pub(crate) fn parse(text: &str, directed: bool) -> Result<GraphBuilder, GraphError> {
    let mut builder = GraphBuilder::new(directed);
    let mut started = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            ["t", ..] => {
                if started {
                    return Err(GraphError::MultipleGraphs { line });
                }
            }
            ["v", id, label] => {
                builder.insert_vertex(vertex_id(id, line)?, (*label).to_string(), Some(line))?;
            }
            ["v", ..] => {
                return Err(GraphError::syntax(line, "expected `v <id> <label>`"));
            }
            ["e", src, dst] => {
                builder.insert_edge(vertex_id(src, line)?, vertex_id(dst, line)?, None, Some(line));
            }
            ["e", src, dst, label] => {
                builder.insert_edge(
                    vertex_id(src, line)?,
                    vertex_id(dst, line)?,
                    Some((*label).to_string()),
                    Some(line),
                );
            }
            ["e", ..] => {
                return Err(GraphError::syntax(line, "expected `e <src> <dst> [<label>]`"));
            }
            [other, ..] => {
                return Err(GraphError::syntax(
                    line,
                    format!("unknown record type `{other}`"),
                ));
            }
            [] => {}
        }
        started = true;
    }

    tracing::trace!("parsed {} vertex records", builder.num_vertices());
    Ok(builder)
}

fn vertex_id(token: &str, line: usize) -> Result<VertexId, GraphError> {
    token
        .parse::<VertexId>()
        .map_err(|_| GraphError::syntax(line, format!("invalid vertex id `{token}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_comments_and_header_skipped() {
        let builder = parse("# a graph\n\nt # 0\nv 0 A\n  # indented comment\nv 1 B\ne 0 1\n", false).unwrap();
        assert_eq!(builder.num_vertices(), 2);
    }

    #[rstest]
    #[case::second_header("t # 0\nv 0 A\nt # 1\n", 3)]
    #[case::late_header("v 0 A\nt # 0\n", 2)]
    fn test_multiple_graphs_rejected(#[case] text: &str, #[case] expected_line: usize) {
        match parse(text, false) {
            Err(GraphError::MultipleGraphs { line }) => assert_eq!(line, expected_line),
            other => panic!("expected MultipleGraphs, got {other:?}"),
        }
    }

    #[rstest]
    #[case::missing_label("v 0\n")]
    #[case::extra_vertex_token("v 0 A B\n")]
    #[case::negative_id("v -1 A\n")]
    #[case::short_edge("v 0 A\ne 0\n")]
    #[case::long_edge("v 0 A\nv 1 A\ne 0 1 x y\n")]
    #[case::bad_edge_id("v 0 A\ne 0 one\n")]
    #[case::unknown_record("x 0 1\n")]
    fn test_syntax_errors(#[case] text: &str) {
        let err = parse(text, true).unwrap_err();
        assert!(matches!(err, GraphError::Syntax { .. }), "got {err:?}");
        assert!(err.is_format_error());
    }
}
