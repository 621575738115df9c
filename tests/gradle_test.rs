//! Tests for the Gradle driver against canned `dependencies` task output.

use std::path::PathBuf;

use depsift::tool::Gradle;
use depsift::{aggregate, render, Forest};

#[ctor::ctor]
fn init() {
    colored::control::set_override(false);
    depsift::util::testing::init_test_setup();
}

const OUTPUT: &str = include_str!("resources/gradle_dependencies.txt");

fn gradle(configuration: &str) -> Gradle {
    Gradle::new(
        PathBuf::from("build.gradle"),
        None,
        configuration.to_string(),
        String::new(),
    )
}

fn labels(forest: &Forest) -> Vec<String> {
    forest.iter().map(|(_, n)| n.label.clone()).collect()
}

// ============================================================
// Report Parsing Tests
// ============================================================

#[test]
fn given_dependencies_report_when_parsing_then_builds_expected_forest() {
    let forest = gradle("runtimeClasspath").parse_dependencies(OUTPUT).unwrap();

    assert_eq!(forest.roots().len(), 3);
    assert_eq!(
        labels(&forest),
        vec![
            "org.jetbrains.kotlin:kotlin-stdlib:1.9.22",
            "org.jetbrains:annotations:13.0",
            "com.squareup.okhttp3:okhttp:4.12.0",
            "org.jetbrains.kotlin:kotlin-stdlib-jdk8:1.9.22",
            "io.netty:netty-handler:4.1.100.Final",
            "io.netty:netty-common:4.1.100.Final",
        ]
    );
}

#[test]
fn given_dependencies_report_when_parsing_then_every_entry_weighs_one() {
    let forest = gradle("runtimeClasspath").parse_dependencies(OUTPUT).unwrap();

    assert!(forest.iter().all(|(_, n)| n.weight == 1));
}

#[test]
fn given_forced_version_entry_when_parsing_then_entry_and_descendants_dropped() {
    // `okio:3.2.0 -> 3.6.0` is not a plain coordinate; neither it nor its
    // child okio-jvm may appear.
    let forest = gradle("runtimeClasspath").parse_dependencies(OUTPUT).unwrap();

    let all = labels(&forest);
    assert!(!all.iter().any(|l| l.contains("okio")));
}

#[test]
fn given_last_sibling_children_when_parsing_then_space_indent_counts() {
    let forest = gradle("runtimeClasspath").parse_dependencies(OUTPUT).unwrap();

    let netty = forest
        .iter()
        .find(|(_, n)| n.label.contains("netty-handler"))
        .map(|(idx, _)| idx)
        .unwrap();
    let children = &forest.get_node(netty).unwrap().children;
    assert_eq!(children.len(), 1);
    assert!(forest
        .get_node(children[0])
        .unwrap()
        .label
        .contains("netty-common"));
}

#[test]
fn given_other_configuration_when_parsing_then_region_is_empty() {
    let forest = gradle("compileClasspath").parse_dependencies(OUTPUT).unwrap();

    assert!(forest.is_empty());
}

// ============================================================
// End-to-End Render Tests
// ============================================================

#[test]
fn given_parsed_report_when_rendering_then_totals_count_entries() {
    let mut forest = gradle("runtimeClasspath").parse_dependencies(OUTPUT).unwrap();
    aggregate(&mut forest);
    let rendered = render(&forest, 0, false);

    assert_eq!(rendered.total_count, 6);
    assert_eq!(rendered.total_weight, 6);
    assert_eq!(rendered.summary(), "6 B in 6 dependencies");
    assert_eq!(rendered.lines.len(), 6);
}
