//! Core library for ux-lint.
//!
//! This crate provides the analyses behind the `ux-lint` CLI and MCP server:
//! a UI inventory with heuristic usability issues, a readability lint, and
//! normalization of accessibility engine results. Every analysis is a pure
//! function of its input plus options.
//!
//! # Modules
//!
//! - [`dom`] - Document tree abstraction and HTML parsing
//! - [`accessible_name`] - Best-effort accessible names for controls
//! - [`inventory`] - UI inventory extraction
//! - [`issues`] - Heuristic issue rules over an inventory
//! - [`text`] - Normalization, sentence splitting, tokens and syllables
//! - [`readability`] - Flesch scoring and long-sentence detection
//! - [`audit`] - Accessibility engine result normalization
//! - [`render`] - Markdown summaries
//! - [`guides`] - Static UX reference guides
//! - [`prompts`] - Prompt templates for UX review work
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use ux_lint_core::dom::HtmlDocument;
//! use ux_lint_core::inventory::{InventoryOptions, extract_ui_inventory};
//!
//! let doc = HtmlDocument::parse(r#"<html lang="en"><title>Home</title><h1>Welcome</h1></html>"#);
//! let inventory = extract_ui_inventory(&doc.tree(), &InventoryOptions::default());
//!
//! assert_eq!(inventory.page.title, "Home");
//! assert!(inventory.issues.is_empty());
//! ```
#![deny(unsafe_code)]

pub mod accessible_name;
pub mod audit;
pub mod config;
pub mod dom;
pub mod error;
pub mod guides;
pub mod inventory;
pub mod issues;
pub mod prompts;
pub mod readability;
pub mod render;
pub mod severity;
pub mod text;

pub use config::{Config, ConfigLoader, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use dom::{DocumentTree, HtmlDocument, HtmlTree};
pub use error::{AuditError, ConfigError, ConfigResult, SourceError, SourceResult};
pub use inventory::{Inventory, InventoryOptions, extract_ui_inventory};
pub use readability::{ReadabilityLint, ReadabilityOptions, lint_readability_from_text};
pub use severity::Severity;
