//! Indented-tree parsing: region extraction, depth inference, insertion.
//!
//! Build tools print their dependency tree as prose-interleaved text where
//! each entry encodes its depth as a run of continuation tokens before a
//! branch marker. This module turns that text into a [`Forest`], leaving
//! payload interpretation (coordinates, sizes) to a caller-supplied
//! extraction callback.

use generational_arena::Index;
use regex::Regex;
use tracing::{instrument, trace};

use crate::errors::{ParseError, ParseResult};
use crate::forest::{Forest, Leaf};

/// Text shape of one build tool's tree report.
#[derive(Debug)]
pub struct TreeDialect {
    /// First line of the tree region within the full output
    pub start: Regex,
    /// First line past the tree region
    pub end: Regex,
    /// Matches a tree entry rather than prose. Group 2 must capture the
    /// branch marker, group 3 the payload.
    pub structural: Regex,
    /// Width in bytes of one continuation unit preceding the branch marker
    pub unit_width: usize,
}

impl TreeDialect {
    pub fn is_structural(&self, line: &str) -> bool {
        self.structural.is_match(line)
    }

    /// Depth encoded by the continuation units before the branch marker,
    /// or `None` for non-structural lines.
    ///
    /// Counting the marker offset instead of pipe characters also covers
    /// children of a last sibling, whose continuation units are all spaces.
    pub fn depth_of(&self, line: &str) -> Option<usize> {
        let caps = self.structural.captures(line)?;
        let marker = caps.get(2)?;
        Some(marker.start() / self.unit_width)
    }

    /// Payload text after the branch marker, or `None` for non-structural
    /// lines.
    pub fn payload<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.structural
            .captures(line)
            .and_then(|caps| caps.get(3))
            .map(|m| m.as_str())
    }

    /// Slice of `lines` delimited by the start and end markers.
    ///
    /// The first start match opens the region; the line before the first
    /// end match closes it. Without a start match the region is empty;
    /// an end match before the start (or no end match) lets the region
    /// run to the end of input.
    pub fn extract_region<'a, 'b>(&self, lines: &'b [&'a str]) -> &'b [&'a str] {
        let Some(start) = lines.iter().position(|line| self.start.is_match(line)) else {
            return &[];
        };
        let end = lines
            .iter()
            .position(|line| self.end.is_match(line))
            .filter(|&end| end > start)
            .unwrap_or(lines.len());
        &lines[start..end]
    }
}

/// Parses structural lines into a forest.
///
/// A line at depth 0 appends a new root; a line at depth d > 0 appends a
/// new node as the last child of the last successfully inserted node at
/// depth d-1. The cursor table holds that node per depth and is truncated
/// on every insertion, which reproduces the walk "down through each
/// level's last child" over stable arena ids.
///
/// Lines whose payload yields no leaf materialize no node. Such a line
/// poisons its depth slot, so lines that would have attached underneath
/// it are skipped as well instead of silently re-attaching to a
/// grandparent. Later siblings at the same depth are unaffected.
#[instrument(level = "debug", skip(lines, dialect, extract_leaf))]
pub fn parse<'a, I, F>(lines: I, dialect: &TreeDialect, mut extract_leaf: F) -> ParseResult<Forest>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str) -> Option<Leaf>,
{
    let mut forest = Forest::new();
    // Last inserted node per depth; None marks a dropped line.
    let mut cursor: Vec<Option<Index>> = Vec::new();

    for line in lines {
        let Some(depth) = dialect.depth_of(line) else {
            continue;
        };

        if depth > cursor.len() {
            return Err(ParseError::MalformedTree {
                line: line.to_string(),
                depth,
                max_depth: cursor.len(),
            });
        }

        let parent = if depth == 0 {
            None
        } else {
            match cursor[depth - 1] {
                Some(idx) => Some(idx),
                None => {
                    // Descendant of a dropped line: skip it and poison
                    // this depth in turn.
                    trace!(line, depth, "skipping descendant of dropped entry");
                    cursor.truncate(depth);
                    cursor.push(None);
                    continue;
                }
            }
        };

        let leaf = dialect.payload(line).and_then(&mut extract_leaf);
        cursor.truncate(depth);
        match leaf {
            Some(leaf) => {
                let idx = forest.insert_node(leaf, parent);
                cursor.push(Some(idx));
            }
            None => {
                trace!(line, depth, "dropping entry without extractable payload");
                cursor.push(None);
            }
        }
    }

    Ok(forest)
}

/// Convenience wrapper: region extraction plus parse over a complete,
/// already-buffered output blob.
pub fn parse_report<F>(output: &str, dialect: &TreeDialect, extract_leaf: F) -> ParseResult<Forest>
where
    F: FnMut(&str) -> Option<Leaf>,
{
    let lines: Vec<&str> = output.lines().collect();
    let region = dialect.extract_region(&lines);
    parse(region.iter().copied(), dialect, extract_leaf)
}
