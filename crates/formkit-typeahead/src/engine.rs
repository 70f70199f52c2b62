//! The typeahead engine.
//!
//! One engine instance owns its catalog, selection, query and error slot.
//! Every mutation runs to completion, leaves derived state consistent and
//! pushes the canonical selection value to the form boundary before it
//! returns. Failed mutations change nothing.

use std::collections::BTreeSet;

use formkit_model::{
    Catalog, ErrorDisplay, FormBoundary, FormControl, FormValue, Presentation, SelectOption,
};
use serde::Serialize;
use tracing::debug;

use crate::accessible::{TagChip, derive_accessible, tagged_chips};
use crate::config::EngineConfig;
use crate::error::{Result, TypeaheadError};
use crate::limit::RenderList;
use crate::rank::{Ranker, rank};
use crate::selection::{Selection, SelectionKind, TagSelection};
use crate::sync::FormSync;

/// Engine for single-select and tagged typeahead widgets.
///
/// # Example
///
/// ```ignore
/// use formkit_typeahead::{EngineConfig, TypeaheadEngine};
///
/// let mut engine = TypeaheadEngine::new(&EngineConfig::tagged());
/// engine.replace_catalog(options)?;
/// engine.add_tag("r")?;
/// engine.set_query("bl");
/// let render = engine.render_list();
/// ```
pub struct TypeaheadEngine {
    limit: usize,
    catalog: Catalog,
    catalog_installed: bool,
    selection: Selection,
    query: String,
    error: ErrorDisplay,
    presentation: Presentation,
    ranker: Box<dyn Ranker>,
    sync: FormSync,
}

impl TypeaheadEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let selection = Selection::new(config.mode);
        Self {
            limit: config.limit,
            catalog: Catalog::default(),
            catalog_installed: false,
            sync: FormSync::new(selection.form_value()),
            selection,
            query: String::new(),
            error: ErrorDisplay::default(),
            presentation: Presentation::default(),
            ranker: config.matcher.build(),
        }
    }

    pub fn single() -> Self {
        Self::new(&EngineConfig::single())
    }

    pub fn tagged() -> Self {
        Self::new(&EngineConfig::tagged())
    }

    /// Replace the ranker, e.g. with a deterministic stub.
    #[must_use]
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Connect the form boundary. It receives the current value immediately.
    pub fn attach_boundary(&mut self, boundary: Box<dyn FormBoundary>) {
        self.sync.attach(boundary);
    }

    pub fn kind(&self) -> SelectionKind {
        self.selection.kind()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Validate and install a new option list.
    ///
    /// Chosen values missing from the new list are dropped. Returns how many
    /// were dropped. On validation failure the previous catalog stays.
    pub fn replace_catalog(&mut self, options: Vec<SelectOption>) -> Result<usize> {
        let catalog = Catalog::new(options)?;
        Ok(self.install_catalog(catalog))
    }

    /// Install an already validated catalog.
    ///
    /// A single-mode query showing a dropped selection's title is reset.
    pub fn install_catalog(&mut self, catalog: Catalog) -> usize {
        self.catalog = catalog;
        self.catalog_installed = true;
        let dropped = self.selection.retain_known(&self.catalog);
        if dropped > 0 && self.kind() == SelectionKind::Single {
            self.query.clear();
        }
        debug!(
            options = self.catalog.len(),
            dropped, "catalog replaced"
        );
        self.synchronize();
        dropped
    }

    /// Whether any catalog was ever installed, even an empty one.
    pub fn has_catalog(&self) -> bool {
        self.catalog_installed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // =========================================================================
    // Query and limit
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "query updated");
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        debug!(limit, "limit updated");
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The chosen value in single mode.
    pub fn current(&self) -> Option<&str> {
        self.selection.current()
    }

    /// The tag set in tagged mode.
    pub fn tags(&self) -> Option<&BTreeSet<String>> {
        self.selection.tagged()
    }

    /// Pick an option.
    ///
    /// Single mode makes it the current value and puts its title in the
    /// query. Tagged mode adds it to the tag set.
    pub fn select(&mut self, value: &str) -> Result<()> {
        let Some(option) = self.catalog.lookup(value) else {
            return Err(TypeaheadError::unknown(value));
        };
        match &mut self.selection {
            Selection::Single { current } => {
                *current = Some(option.value.clone());
                self.query = option.title.clone();
                debug!(value, "option selected");
            }
            Selection::Tagged { tagged } => {
                let inserted = tagged.insert(option.value.clone());
                debug!(value, inserted, tagged = tagged.len(), "tag added");
            }
        }
        self.synchronize();
        Ok(())
    }

    /// Undo a pick. Values that are not chosen are ignored.
    pub fn deselect(&mut self, value: &str) {
        match &mut self.selection {
            Selection::Single { current } => {
                if current.as_deref() == Some(value) {
                    *current = None;
                    self.query.clear();
                    debug!(value, "option deselected");
                }
            }
            Selection::Tagged { tagged } => {
                let removed = tagged.remove(value);
                debug!(value, removed, tagged = tagged.len(), "tag removed");
            }
        }
        self.synchronize();
    }

    /// Drop every chosen value. Single mode also empties the query.
    pub fn clear(&mut self) {
        self.selection.clear();
        if self.kind() == SelectionKind::Single {
            self.query.clear();
        }
        debug!("selection cleared");
        self.synchronize();
    }

    /// External assignment of the single value.
    ///
    /// An empty or absent value clears. A value the catalog does not offer is
    /// ignored without error, so stale external state never surfaces as a
    /// failure; use [`Self::select`] for strict validation.
    pub fn assign(&mut self, value: Option<&str>) -> Result<()> {
        self.require(SelectionKind::Single, "assign")?;
        match value {
            None | Some("") => {
                self.clear();
                Ok(())
            }
            Some(value) if self.catalog.contains(value) => self.select(value),
            Some(value) => {
                debug!(value, "ignoring assignment of unknown option");
                Ok(())
            }
        }
    }

    /// Add a tag. Adding a tag twice is a no-op.
    ///
    /// Returns whether the tag was newly added.
    pub fn add_tag(&mut self, value: &str) -> Result<bool> {
        self.require(SelectionKind::Tagged, "add_tag")?;
        let was_tagged = self.selection.contains(value);
        self.select(value)?;
        Ok(!was_tagged)
    }

    /// Remove a tag. Removing an absent tag is a no-op.
    ///
    /// Returns whether the tag was present.
    pub fn remove_tag(&mut self, value: &str) -> Result<bool> {
        self.require(SelectionKind::Tagged, "remove_tag")?;
        let was_tagged = self.selection.contains(value);
        self.deselect(value);
        Ok(was_tagged)
    }

    /// Replace the whole tag set in one step.
    ///
    /// Every value must be in the catalog; otherwise nothing changes.
    pub fn replace_tags(&mut self, tags: TagSelection) -> Result<()> {
        self.require(SelectionKind::Tagged, "replace_tags")?;
        if let Some(unknown) = tags.values().iter().find(|v| !self.catalog.contains(v)) {
            return Err(TypeaheadError::unknown(unknown.as_str()));
        }
        if let Selection::Tagged { tagged } = &mut self.selection {
            *tagged = tags.into_inner();
            debug!(tagged = tagged.len(), "tags replaced");
        }
        self.synchronize();
        Ok(())
    }

    /// The chip for a tagged value, for hosts reacting to chip clicks.
    pub fn activate_tag(&self, value: &str) -> Result<TagChip> {
        self.require(SelectionKind::Tagged, "activate_tag")?;
        if !self.selection.contains(value) {
            return Err(TypeaheadError::unknown(value));
        }
        self.catalog
            .lookup(value)
            .map(TagChip::from)
            .ok_or_else(|| TypeaheadError::unknown(value))
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Options the query is matched against, in catalog order.
    ///
    /// Tagged mode excludes already tagged options.
    pub fn searchable(&self) -> Vec<&SelectOption> {
        match &self.selection {
            Selection::Single { .. } => self.catalog.iter().collect(),
            Selection::Tagged { tagged } => derive_accessible(&self.catalog, tagged),
        }
    }

    /// Ranked and capped options for the current query.
    pub fn render_list(&self) -> RenderList {
        let ranked = rank(self.ranker.as_ref(), &self.query, self.searchable());
        RenderList::from_ranked(ranked, self.limit)
    }

    /// True when the render list is empty.
    pub fn is_empty(&self) -> bool {
        self.render_list().is_empty()
    }

    /// Tagged options in catalog order. Empty in single mode.
    pub fn tag_list(&self) -> Vec<TagChip> {
        match &self.selection {
            Selection::Single { .. } => Vec::new(),
            Selection::Tagged { tagged } => tagged_chips(&self.catalog, tagged),
        }
    }

    /// The value last pushed to the form boundary.
    pub fn form_value(&self) -> &FormValue {
        self.sync.value()
    }

    /// Everything a view needs to re-render.
    pub fn view(&self) -> EngineView {
        let render = self.render_list();
        EngineView {
            query: self.query.clone(),
            is_empty: render.is_empty(),
            results: render.titles().into_iter().map(String::from).collect(),
            tags: self.tag_list(),
            form_value: self.form_value().encode(),
            error: self.error.message().map(String::from),
            invalid: self.error.is_invalid(),
        }
    }

    // =========================================================================
    // Error display and presentation
    // =========================================================================

    /// Write the error slot. Selection changes never clear it.
    pub fn set_error(&mut self, message: Option<String>) {
        self.error.set(message);
        debug!(invalid = self.error.is_invalid(), "error display updated");
        self.sync.push_validity(self.error.is_invalid());
    }

    pub fn error(&self) -> &ErrorDisplay {
        &self.error
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    fn require(&self, kind: SelectionKind, operation: &'static str) -> Result<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(TypeaheadError::UnsupportedOperation {
                operation,
                mode: self.kind(),
            })
        }
    }

    fn synchronize(&mut self) {
        let value = self.selection.form_value();
        self.sync.push(value);
    }
}

impl std::fmt::Debug for TypeaheadEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeaheadEngine")
            .field("limit", &self.limit)
            .field("options", &self.catalog.len())
            .field("selection", &self.selection)
            .field("query", &self.query)
            .field("error", &self.error)
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}

impl FormControl for TypeaheadEngine {
    fn name(&self) -> Option<&str> {
        self.presentation.name.as_deref()
    }

    fn form_value(&self) -> FormValue {
        self.sync.value().clone()
    }

    fn error(&self) -> &ErrorDisplay {
        &self.error
    }

    fn set_error(&mut self, message: Option<String>) {
        TypeaheadEngine::set_error(self, message);
    }
}

/// Snapshot of render state for a view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineView {
    pub query: String,
    pub results: Vec<String>,
    pub is_empty: bool,
    pub tags: Vec<TagChip>,
    pub form_value: String,
    pub error: Option<String>,
    pub invalid: bool,
}
