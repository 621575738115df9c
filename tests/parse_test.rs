//! Tests for the indented-tree parser: region extraction, depth
//! bookkeeping, cursor handling for dropped lines.

use depsift::{parse, parse_report, Forest, Leaf, ParseError, TreeDialect};
use regex::Regex;

#[ctor::ctor]
fn init() {
    depsift::util::testing::init_test_setup();
}

/// Gradle-flavored test dialect with `label:weight` payloads.
fn dialect() -> TreeDialect {
    TreeDialect {
        start: Regex::new(r"^--- tree ---$").unwrap(),
        end: Regex::new(r"^--- end ---$").unwrap(),
        structural: Regex::new(r"^(\|\s{4}|\s{5})*(\+---|\\---) (.+)$").unwrap(),
        unit_width: 5,
    }
}

fn extract(payload: &str) -> Option<Leaf> {
    let (label, weight) = payload.split_once(':')?;
    Some(Leaf {
        label: label.to_string(),
        weight: weight.parse().ok()?,
    })
}

fn parse_lines(lines: &[&str]) -> Result<Forest, ParseError> {
    parse(lines.iter().copied(), &dialect(), extract)
}

fn root_labels(forest: &Forest) -> Vec<String> {
    forest
        .roots()
        .iter()
        .map(|&idx| forest.get_node(idx).unwrap().label.clone())
        .collect()
}

fn children_of(forest: &Forest, label: &str) -> Vec<String> {
    let (_, node) = forest.iter().find(|(_, n)| n.label == label).unwrap();
    node.children
        .iter()
        .map(|&c| forest.get_node(c).unwrap().label.clone())
        .collect()
}

// ============================================================
// Order and Structure Tests
// ============================================================

#[test]
fn given_flat_lines_when_parsing_then_root_order_matches_input() {
    let forest = parse_lines(&["+--- a:1", "+--- b:2", "\\--- c:3"]).unwrap();

    assert_eq!(root_labels(&forest), vec!["a", "b", "c"]);
    assert_eq!(forest.len(), 3);
}

#[test]
fn given_nested_lines_when_parsing_then_children_attach_to_last_node_above() {
    let forest = parse_lines(&[
        "+--- a:1",
        "|    +--- a1:2",
        "|    \\--- a2:3",
        "\\--- b:4",
    ])
    .unwrap();

    assert_eq!(root_labels(&forest), vec!["a", "b"]);
    assert_eq!(children_of(&forest, "a"), vec!["a1", "a2"]);
    assert!(children_of(&forest, "b").is_empty());
}

#[test]
fn given_space_continuation_when_parsing_then_depth_counts_it() {
    // Children of a last sibling are indented with spaces, not pipes.
    let forest = parse_lines(&["\\--- a:1", "     \\--- a1:2"]).unwrap();

    assert_eq!(root_labels(&forest), vec!["a"]);
    assert_eq!(children_of(&forest, "a"), vec!["a1"]);
}

#[test]
fn given_deeply_nested_lines_when_parsing_then_each_level_attaches_correctly() {
    let forest = parse_lines(&[
        "+--- a:1",
        "|    \\--- a1:2",
        "|         \\--- a11:3",
        "\\--- b:4",
    ])
    .unwrap();

    assert_eq!(children_of(&forest, "a"), vec!["a1"]);
    assert_eq!(children_of(&forest, "a1"), vec!["a11"]);
    assert_eq!(root_labels(&forest), vec!["a", "b"]);
}

#[test]
fn given_prose_between_entries_when_parsing_then_prose_is_ignored() {
    let forest = parse_lines(&["+--- a:1", "some build chatter", "\\--- b:2"]).unwrap();

    assert_eq!(root_labels(&forest), vec!["a", "b"]);
}

// ============================================================
// Malformed Depth Tests
// ============================================================

#[test]
fn given_depth_jump_when_parsing_then_fails_with_malformed_tree() {
    let result = parse_lines(&["+--- a:1", "|    |    \\--- deep:2"]);

    match result {
        Err(ParseError::MalformedTree {
            depth, max_depth, ..
        }) => {
            assert_eq!(depth, 2);
            assert_eq!(max_depth, 1);
        }
        other => panic!("expected MalformedTree, got {:?}", other),
    }
}

#[test]
fn given_indented_first_line_when_parsing_then_fails_with_malformed_tree() {
    let result = parse_lines(&["|    \\--- orphan:1"]);

    assert!(matches!(
        result,
        Err(ParseError::MalformedTree {
            depth: 1,
            max_depth: 0,
            ..
        })
    ));
}

// ============================================================
// Dropped Line Tests
// ============================================================

#[test]
fn given_unparsable_payload_when_parsing_then_line_is_dropped() {
    let forest = parse_lines(&["+--- garbage", "\\--- b:2"]).unwrap();

    assert_eq!(root_labels(&forest), vec!["b"]);
    assert_eq!(forest.len(), 1);
}

#[test]
fn given_dropped_line_when_parsing_then_descendants_are_skipped() {
    // The child of the dropped entry must not re-attach to a grandparent.
    let forest = parse_lines(&["+--- garbage", "|    \\--- child:5", "\\--- b:2"]).unwrap();

    assert_eq!(root_labels(&forest), vec!["b"]);
    assert_eq!(forest.len(), 1);
}

#[test]
fn given_dropped_line_when_parsing_then_later_siblings_are_unaffected() {
    let forest = parse_lines(&["+--- a:1", "|    +--- garbage", "|    \\--- a2:3"]).unwrap();

    assert_eq!(children_of(&forest, "a"), vec!["a2"]);
}

#[test]
fn given_dropped_subtree_when_parsing_then_following_root_still_parses() {
    let forest = parse_lines(&[
        "+--- garbage",
        "|    +--- child:1",
        "|    |    \\--- grandchild:2",
        "\\--- b:3",
    ])
    .unwrap();

    assert_eq!(root_labels(&forest), vec!["b"]);
    assert_eq!(forest.len(), 1);
}

// ============================================================
// Region Extraction Tests
// ============================================================

#[test]
fn given_markers_when_parsing_report_then_only_region_participates() {
    let blob = "\
prelude chatter
+--- outside:99
--- tree ---
+--- a:1
\\--- b:2
--- end ---
+--- after:3
";
    let forest = parse_report(blob, &dialect(), extract).unwrap();

    assert_eq!(root_labels(&forest), vec!["a", "b"]);
}

#[test]
fn given_no_start_marker_when_parsing_report_then_forest_is_empty() {
    let blob = "+--- a:1\n\\--- b:2\n";
    let forest = parse_report(blob, &dialect(), extract).unwrap();

    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
}

#[test]
fn given_end_marker_before_start_when_parsing_report_then_region_runs_to_eof() {
    let blob = "\
--- end ---
--- tree ---
+--- a:1
\\--- b:2
";
    let forest = parse_report(blob, &dialect(), extract).unwrap();

    assert_eq!(root_labels(&forest), vec!["a", "b"]);
}
