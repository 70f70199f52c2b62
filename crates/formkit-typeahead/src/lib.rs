//! Typeahead selection engine for single-select and tagged form widgets.
//!
//! The engine ranks a catalog of options against a free-text query, caps the
//! rendered results, keeps the selection (one value, or a set of tags) and
//! pushes the selection to the enclosing form after every change. Rendering is
//! left to the host: it re-renders from [`TypeaheadEngine::view`].
//!
//! Inbound configuration goes through [`AttributeMapper`], which applies
//! typed [`Command`]s one at a time in arrival order.

#![deny(unsafe_code)]

pub mod accessible;
pub mod config;
pub mod engine;
pub mod error;
pub mod limit;
pub mod mapper;
pub mod rank;
pub mod selection;
pub mod sync;

pub use accessible::{TagChip, derive_accessible, tagged_chips};
pub use config::{DEFAULT_LIMIT, EngineConfig, MatcherKind};
pub use engine::{EngineView, TypeaheadEngine};
pub use error::{Result, TypeaheadError};
pub use limit::{NO_RESULTS_LABEL, RenderList, limit};
pub use mapper::{AttributeMapper, Command, DispatchOutcome, DispatchStatus};
pub use rank::{Ranker, SearchKey, SimilarityRanker, SubsequenceRanker, rank};
pub use selection::{Selection, SelectionKind, TagSelection};
pub use sync::FormSync;
