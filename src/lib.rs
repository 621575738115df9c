//! depsift: dependency-tree weight analysis for JVM build tools.
//!
//! The pipeline has three stages over an arena-backed forest:
//! [`parse`](parse::parse) turns the tool's indented tree report into a
//! [`Forest`], [`aggregate`](aggregate::aggregate) assigns depths and
//! cumulative subtree weights, and [`render`](render::render) produces
//! connector-decorated lines with threshold highlighting plus totals.
//! The [`tool`] drivers run Maven or Gradle and supply the per-line leaf
//! extraction (coordinates and artifact sizes).

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod forest;
pub mod parse;
pub mod render;
pub mod tool;
pub mod util;

pub use aggregate::aggregate;
pub use errors::{ParseError, ToolError};
pub use forest::{Forest, Leaf, Node};
pub use parse::{parse, parse_report, TreeDialect};
pub use render::{render, Rendered};
