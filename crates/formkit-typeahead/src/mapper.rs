//! Translation of inbound configuration into engine mutations.
//!
//! Hosts deliver configuration as loosely ordered attribute changes. The
//! [`AttributeMapper`] turns each one into a typed [`Command`] and applies
//! commands strictly in arrival order, one at a time.
//!
//! Commands that reference option values cannot be checked before any catalog
//! exists, so until the first catalog is installed they are queued and
//! replayed right after it. Once something is queued, every later command
//! joins the same queue until the catalog arrives, so replay keeps arrival
//! order. Once a catalog exists, a stale reference fails with
//! [`TypeaheadError::UnknownOption`] and changes nothing.

use std::collections::VecDeque;

use formkit_model::{Catalog, SelectOption};
use tracing::debug;

use crate::engine::TypeaheadEngine;
use crate::error::{Result, TypeaheadError};
use crate::selection::{SelectionKind, TagSelection};

/// A single engine mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetCatalog(Vec<SelectOption>),
    SetLimit(usize),
    SetQuery(String),
    SetError(Option<String>),
    SetTagged(TagSelection),
    Assign(Option<String>),
    Select(String),
    Deselect(String),
    AddTag(String),
    RemoveTag(String),
    Clear,
    SetPlaceholder(String),
    SetName(String),
    SetLabel(String),
}

impl Command {
    /// Parse a host attribute into a command.
    ///
    /// `value` is interpreted per mode: a plain string in single mode, a JSON
    /// array of values in tagged mode.
    pub fn from_attribute(name: &str, raw: &str, mode: SelectionKind) -> Result<Self> {
        let command = match name {
            "options" => {
                let options: Vec<SelectOption> = serde_json::from_str(raw)
                    .map_err(|err| TypeaheadError::InvalidCatalog(err.into()))?;
                Self::SetCatalog(options)
            }
            "limit" => {
                let limit = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|err| invalid_attribute(name, err.to_string()))?;
                Self::SetLimit(limit)
            }
            "query" => Self::SetQuery(raw.to_string()),
            "data-error" => Self::SetError(non_empty(raw)),
            "tagged" => Self::SetTagged(TagSelection::parse(raw)?),
            "value" => match mode {
                SelectionKind::Single => Self::Assign(non_empty(raw)),
                SelectionKind::Tagged => Self::SetTagged(TagSelection::parse(raw)?),
            },
            "placeholder" => Self::SetPlaceholder(raw.to_string()),
            "name" => Self::SetName(raw.to_string()),
            "label" => Self::SetLabel(raw.to_string()),
            other => return Err(invalid_attribute(other, "unknown attribute")),
        };
        Ok(command)
    }

    /// Short name for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SetCatalog(_) => "set_catalog",
            Self::SetLimit(_) => "set_limit",
            Self::SetQuery(_) => "set_query",
            Self::SetError(_) => "set_error",
            Self::SetTagged(_) => "set_tagged",
            Self::Assign(_) => "assign",
            Self::Select(_) => "select",
            Self::Deselect(_) => "deselect",
            Self::AddTag(_) => "add_tag",
            Self::RemoveTag(_) => "remove_tag",
            Self::Clear => "clear",
            Self::SetPlaceholder(_) => "set_placeholder",
            Self::SetName(_) => "set_name",
            Self::SetLabel(_) => "set_label",
        }
    }

    /// Whether the command names option values that must exist in a catalog.
    fn references_options(&self) -> bool {
        matches!(
            self,
            Self::SetTagged(_)
                | Self::Assign(Some(_))
                | Self::Select(_)
                | Self::Deselect(_)
                | Self::AddTag(_)
                | Self::RemoveTag(_)
        )
    }
}

fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

fn invalid_attribute(name: &str, reason: impl Into<String>) -> TypeaheadError {
    TypeaheadError::InvalidAttribute {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Applied to the engine.
    Applied,
    /// Queued until the first catalog arrives.
    Deferred,
}

/// Result of a successful dispatch.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    /// Queued commands applied after this one (first catalog only).
    pub replayed: usize,
    /// Queued commands that failed on replay, in queue order.
    pub replay_failures: Vec<TypeaheadError>,
}

impl DispatchOutcome {
    fn applied() -> Self {
        Self {
            status: DispatchStatus::Applied,
            replayed: 0,
            replay_failures: Vec::new(),
        }
    }

    fn deferred() -> Self {
        Self {
            status: DispatchStatus::Deferred,
            replayed: 0,
            replay_failures: Vec::new(),
        }
    }
}

/// Serializing dispatcher in front of a [`TypeaheadEngine`].
///
/// The mapper owns the engine; every mutation goes through [`Self::dispatch`].
/// An engine that already holds a catalog applies commands immediately.
#[derive(Debug)]
pub struct AttributeMapper {
    engine: TypeaheadEngine,
    pending: VecDeque<Command>,
}

impl AttributeMapper {
    pub fn new(engine: TypeaheadEngine) -> Self {
        Self {
            engine,
            pending: VecDeque::new(),
        }
    }

    pub fn engine(&self) -> &TypeaheadEngine {
        &self.engine
    }

    /// Number of commands waiting for the first catalog.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Parse and dispatch a host attribute change.
    pub fn apply_attribute(&mut self, name: &str, raw: &str) -> Result<DispatchOutcome> {
        let command = Command::from_attribute(name, raw, self.engine.kind())?;
        self.dispatch(command)
    }

    /// Apply one command, or queue it if it has to wait for the first catalog.
    pub fn dispatch(&mut self, command: Command) -> Result<DispatchOutcome> {
        if self.must_wait(&command) {
            debug!(
                command = command.label(),
                pending = self.pending.len() + 1,
                "deferring command until a catalog is installed"
            );
            self.pending.push_back(command);
            return Ok(DispatchOutcome::deferred());
        }

        self.apply(command)?;
        let mut outcome = DispatchOutcome::applied();
        if self.engine.has_catalog() && !self.pending.is_empty() {
            self.replay(&mut outcome);
        }
        Ok(outcome)
    }

    /// Before the first catalog, value references wait, and so does anything
    /// arriving behind them.
    fn must_wait(&self, command: &Command) -> bool {
        !self.engine.has_catalog()
            && !matches!(command, Command::SetCatalog(_))
            && (command.references_options() || !self.pending.is_empty())
    }

    fn replay(&mut self, outcome: &mut DispatchOutcome) {
        while let Some(command) = self.pending.pop_front() {
            let label = command.label();
            outcome.replayed += 1;
            if let Err(err) = self.apply(command) {
                debug!(command = label, error = %err, "deferred command failed on replay");
                outcome.replay_failures.push(err);
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        let engine = &mut self.engine;
        match command {
            Command::SetCatalog(options) => {
                let catalog = Catalog::new(options)?;
                engine.install_catalog(catalog);
            }
            Command::SetLimit(limit) => engine.set_limit(limit),
            Command::SetQuery(query) => engine.set_query(query),
            Command::SetError(message) => engine.set_error(message),
            Command::SetTagged(tags) => engine.replace_tags(tags)?,
            Command::Assign(value) => engine.assign(value.as_deref())?,
            Command::Select(value) => engine.select(&value)?,
            Command::Deselect(value) => engine.deselect(&value),
            Command::AddTag(value) => {
                engine.add_tag(&value)?;
            }
            Command::RemoveTag(value) => {
                engine.remove_tag(&value)?;
            }
            Command::Clear => engine.clear(),
            Command::SetPlaceholder(text) => engine.presentation_mut().placeholder = Some(text),
            Command::SetName(text) => engine.presentation_mut().name = Some(text),
            Command::SetLabel(text) => engine.presentation_mut().label = Some(text),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use formkit_model::FormValue;

    use super::*;

    const COLORS: &str = r#"[{"title":"Red","value":"r","chip":"R"},{"title":"Blue","value":"b","chip":"B"}]"#;

    #[test]
    fn parses_known_attributes() {
        let mode = SelectionKind::Single;
        assert_eq!(
            Command::from_attribute("limit", " 10 ", mode).unwrap(),
            Command::SetLimit(10)
        );
        assert_eq!(
            Command::from_attribute("data-error", "", mode).unwrap(),
            Command::SetError(None)
        );
        assert_eq!(
            Command::from_attribute("value", "r", mode).unwrap(),
            Command::Assign(Some("r".to_string()))
        );
        assert!(matches!(
            Command::from_attribute("value", r#"["r"]"#, SelectionKind::Tagged).unwrap(),
            Command::SetTagged(_)
        ));
    }

    #[test]
    fn rejects_bad_attributes() {
        let mode = SelectionKind::Single;
        assert!(matches!(
            Command::from_attribute("limit", "ten", mode),
            Err(TypeaheadError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            Command::from_attribute("colour", "red", mode),
            Err(TypeaheadError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            Command::from_attribute("options", "[{}]", mode),
            Err(TypeaheadError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn tags_before_catalog_are_replayed() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::tagged());
        let outcome = mapper.apply_attribute("tagged", r#"["r"]"#).unwrap();
        assert_eq!(outcome.status, DispatchStatus::Deferred);
        assert_eq!(mapper.pending(), 1);

        let outcome = mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(outcome.status, DispatchStatus::Applied);
        assert_eq!(outcome.replayed, 1);
        assert!(outcome.replay_failures.is_empty());
        assert_eq!(mapper.engine().form_value(), &FormValue::tags(["r"]));
    }

    #[test]
    fn replay_failures_are_reported() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::tagged());
        mapper.dispatch(Command::AddTag("zzz".to_string())).unwrap();
        mapper.dispatch(Command::AddTag("b".to_string())).unwrap();
        let outcome = mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(outcome.replayed, 2);
        assert_eq!(outcome.replay_failures.len(), 1);
        assert!(matches!(
            outcome.replay_failures[0],
            TypeaheadError::UnknownOption { .. }
        ));
        assert_eq!(mapper.engine().form_value(), &FormValue::tags(["b"]));
    }

    #[test]
    fn stale_reference_after_catalog_fails() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::tagged());
        mapper.apply_attribute("options", COLORS).unwrap();
        let err = mapper.apply_attribute("tagged", r#"["g"]"#).unwrap_err();
        assert!(matches!(err, TypeaheadError::UnknownOption { .. }));
        assert_eq!(mapper.pending(), 0);
    }

    #[test]
    fn query_and_limit_apply_without_catalog() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::single());
        mapper.apply_attribute("query", "re").unwrap();
        mapper.apply_attribute("limit", "3").unwrap();
        assert_eq!(mapper.engine().query(), "re");
        assert_eq!(mapper.engine().limit(), 3);
        assert_eq!(mapper.pending(), 0);
    }

    #[test]
    fn presentation_is_passed_through() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::single());
        mapper.apply_attribute("placeholder", "Pick a color").unwrap();
        mapper.apply_attribute("name", "color").unwrap();
        let presentation = mapper.engine().presentation();
        assert_eq!(presentation.placeholder.as_deref(), Some("Pick a color"));
        assert_eq!(presentation.name.as_deref(), Some("color"));
    }

    #[test]
    fn clearing_assignment_behind_a_queued_one_wins() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::single());
        mapper.apply_attribute("value", "r").unwrap();
        let outcome = mapper.apply_attribute("value", "").unwrap();
        assert_eq!(outcome.status, DispatchStatus::Deferred);

        let outcome = mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(outcome.replayed, 2);
        assert_eq!(mapper.engine().current(), None);
        assert_eq!(mapper.engine().form_value(), &FormValue::text(""));
    }

    #[test]
    fn clear_behind_a_queued_tag_wins() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::tagged());
        mapper.dispatch(Command::AddTag("r".to_string())).unwrap();
        mapper.dispatch(Command::Clear).unwrap();
        assert_eq!(mapper.pending(), 2);

        mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(mapper.engine().tags().map(|tags| tags.len()), Some(0));
        assert_eq!(mapper.engine().form_value(), &FormValue::tags(Vec::<String>::new()));
    }

    #[test]
    fn query_behind_a_queued_select_wins() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::single());
        mapper.dispatch(Command::Select("r".to_string())).unwrap();
        mapper.apply_attribute("query", "bl").unwrap();

        mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(mapper.engine().current(), Some("r"));
        assert_eq!(mapper.engine().query(), "bl");
        assert_eq!(mapper.pending(), 0);
    }

    #[test]
    fn engine_with_catalog_applies_immediately() {
        let mut engine = TypeaheadEngine::tagged();
        engine
            .replace_catalog(vec![SelectOption::new("Red", "r", "R")])
            .unwrap();
        let mut mapper = AttributeMapper::new(engine);

        let err = mapper.dispatch(Command::AddTag("zzz".to_string())).unwrap_err();
        assert!(matches!(err, TypeaheadError::UnknownOption { .. }));
        let outcome = mapper.dispatch(Command::AddTag("r".to_string())).unwrap();
        assert_eq!(outcome.status, DispatchStatus::Applied);
        assert_eq!(mapper.pending(), 0);
    }

    #[test]
    fn invalid_first_catalog_keeps_queue() {
        let mut mapper = AttributeMapper::new(TypeaheadEngine::single());
        mapper.dispatch(Command::Select("r".to_string())).unwrap();
        let err = mapper.apply_attribute("options", r#"[{"title":"X","value":""}]"#);
        assert!(matches!(err, Err(TypeaheadError::InvalidCatalog(_))));
        assert_eq!(mapper.pending(), 1);

        mapper.apply_attribute("options", COLORS).unwrap();
        assert_eq!(mapper.engine().current(), Some("r"));
    }
}
