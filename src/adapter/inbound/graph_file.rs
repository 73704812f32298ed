//! Plain-text graph files.
//!
//! A file holds three non-blank lines:
//!
//! ```text
//! 0 1 0 1
//! (0,1,5);(1,2,3);(2,3,4);(0,3,10)
//! 0 3
//! ```
//!
//! The first line gives one color per node, the second the undirected
//! weighted edges, the third the source and target. Parse failures carry the
//! byte span of the offending token.

use std::path::Path;

use crate::domain::graph::{Edge, GraphModel, Instance};
use crate::error::{InputError, Result};

/// Raw contents of a graph file, before structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    pub colors: Vec<i64>,
    pub edges: Vec<Edge>,
    pub source: usize,
    pub target: usize,
}

impl GraphFile {
    /// Parse graph text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] for a missing line, a malformed token, or
    /// content after the third line.
    pub fn parse(text: &str) -> std::result::Result<Self, InputError> {
        let mut lines = content_lines(text);

        let colors_line = lines
            .next()
            .ok_or_else(|| missing(text, 1, "missing node colors"))?;
        let colors = split_tokens(colors_line.text, char::is_whitespace)
            .into_iter()
            .map(|(at, token)| {
                token
                    .parse::<i64>()
                    .map_err(|_| colors_line.error(at, token, format!("invalid color `{token}`")))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let edges_line = lines
            .next()
            .ok_or_else(|| missing(text, colors_line.number + 1, "missing edge list"))?;
        let edges = split_tokens(edges_line.text, |c| c == ';')
            .into_iter()
            .filter_map(|(at, raw)| {
                let token = raw.trim();
                (!token.is_empty()).then(|| (at + raw.len() - raw.trim_start().len(), token))
            })
            .map(|(at, token)| parse_edge(token).map_err(|m| edges_line.error(at, token, m)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let ends_line = lines
            .next()
            .ok_or_else(|| missing(text, edges_line.number + 1, "missing source and target"))?;
        let ends = split_tokens(ends_line.text, char::is_whitespace);
        let [(source_at, source), (target_at, target)] = ends[..] else {
            return Err(ends_line.error(
                0,
                ends_line.text,
                format!("expected `source target`, found {} values", ends.len()),
            ));
        };
        let source = parse_node(source)
            .ok_or_else(|| ends_line.error(source_at, source, format!("invalid node `{source}`")))?;
        let target = parse_node(target)
            .ok_or_else(|| ends_line.error(target_at, target, format!("invalid node `{target}`")))?;

        if let Some(extra) = lines.next() {
            return Err(extra.error(0, extra.text, "unexpected content after source and target"));
        }

        Ok(Self {
            colors,
            edges,
            source,
            target,
        })
    }

    /// Validate the parsed contents into an instance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`](crate::error::DomainError) or
    /// [`ModelError`](crate::error::ModelError) from graph and instance
    /// validation.
    pub fn into_instance(self) -> Result<Instance> {
        let graph = GraphModel::new(self.colors, self.edges)?;
        Instance::new(graph, self.source, self.target)
    }
}

/// Read the text of a graph file.
///
/// The text is returned unparsed so parse errors can be shown against it.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be read.
pub fn read<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// A non-blank line with its position in the whole input.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl Line<'_> {
    fn error(&self, at: usize, token: &str, message: impl Into<String>) -> InputError {
        InputError::new(self.number, self.offset + at, token.len(), message)
    }
}

fn content_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();
            let trimmed = raw.trim_end_matches(['\n', '\r']);
            let lead = trimmed.len() - trimmed.trim_start().len();
            Line {
                number: index + 1,
                offset: start + lead,
                text: trimmed.trim(),
            }
        })
        .filter(|line| !line.text.is_empty())
}

fn missing(text: &str, line: usize, message: &str) -> InputError {
    InputError::new(line, text.len(), 0, message)
}

/// Split `line` on separator characters, keeping each token's byte offset.
fn split_tokens(line: &str, is_separator: impl Fn(char) -> bool) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (index, c) in line.char_indices() {
        if is_separator(c) {
            if let Some(begin) = start.take() {
                tokens.push((begin, &line[begin..index]));
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(begin) = start {
        tokens.push((begin, &line[begin..]));
    }
    tokens
}

fn parse_edge(token: &str) -> std::result::Result<Edge, String> {
    let shape = || format!("expected an edge like `(a,b,w)`, found `{token}`");
    let inner = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(shape)?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [from, to, weight] = parts[..] else {
        return Err(shape());
    };
    let from = parse_node(from).ok_or_else(|| format!("invalid node `{from}` in `{token}`"))?;
    let to = parse_node(to).ok_or_else(|| format!("invalid node `{to}` in `{token}`"))?;
    let weight = weight
        .parse::<i64>()
        .map_err(|_| format!("invalid weight `{weight}` in `{token}`"))?;
    Ok(Edge::new(from, to, weight))
}

fn parse_node(token: &str) -> Option<usize> {
    token.parse().ok()
}
