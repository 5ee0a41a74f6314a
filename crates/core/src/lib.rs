//! Core library for pdfdiff
//!
//! This crate implements the **Functional Core** of the pdfdiff application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The pdfdiff project uses a three-crate architecture to enforce separation of concerns:
//!
//! - **`pdfdiff_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: PDF parsing, composition and the comparison orchestrator (the Imperative Shell)
//! - **`pdfdiff`**: The command line front-end
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! The one exception is [`observer::LogObserver`], which forwards diagnostic
//! events to the `log` facade. It holds no state of its own.
//!
//! # Module Organization
//!
//! - [`types`]: Geometry, spans, word records and highlight instructions
//! - [`words`]: Span-to-word geometry estimation
//! - [`italic`]: Font-name italic classification and the words-of-interest filter
//! - [`matcher`]: Cross-document word matching
//! - [`highlight`]: Per-page highlight planning
//! - [`page`]: Output page geometry
//! - [`observer`]: Diagnostic events emitted during a comparison run
//! - [`summary`]: Run summary, per-page statistics and the color legend
//! - [`naming`]: Default output file naming
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use pdfdiff_core::highlight::{plan_page_highlights, PagePlanInput};
//! use pdfdiff_core::italic::ItalicFilter;
//! use pdfdiff_core::words::estimate_words;
//!
//! let words_a = estimate_words(&span_a);
//! let words_b = estimate_words(&span_b);
//!
//! let plan = plan_page_highlights(&PagePlanInput {
//!     words_a: &words_a,
//!     words_b: &words_b,
//!     offset_a: (0.0, 0.0),
//!     offset_b: (612.0, 0.0),
//!     tolerance: 5,
//!     italic_filter: &ItalicFilter::default(),
//! });
//!
//! assert!(plan.highlights.is_empty());
//! ```

pub mod highlight;
pub mod italic;
pub mod matcher;
pub mod naming;
pub mod observer;
pub mod page;
pub mod summary;
pub mod types;
pub mod words;

pub use types::*;
