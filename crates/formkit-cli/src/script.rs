//! Replay scripts: a JSON list of host events fed through an [`AttributeMapper`].
//!
//! Each step is either an attribute change,
//! `{ "attribute": "options", "value": "[...]" }`, or a user action,
//! `{ "action": "add_tag", "value": "r" }`.

use formkit_typeahead::{
    AttributeMapper, Command, DispatchStatus, EngineView, SelectionKind, TypeaheadError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// User interaction a script can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Select,
    Deselect,
    AddTag,
    RemoveTag,
    Clear,
}

impl ScriptAction {
    fn label(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Deselect => "deselect",
            Self::AddTag => "add_tag",
            Self::RemoveTag => "remove_tag",
            Self::Clear => "clear",
        }
    }
}

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Attribute {
        attribute: String,
        value: String,
    },
    Action {
        action: ScriptAction,
        #[serde(default)]
        value: Option<String>,
    },
}

impl ScriptStep {
    /// Human-readable description, e.g. `query=re` or `add_tag(r)`.
    ///
    /// Long attribute values are abbreviated.
    pub fn describe(&self) -> String {
        match self {
            Self::Attribute { attribute, value } => {
                format!("{attribute}={}", abbreviate(value, DESCRIBE_WIDTH))
            }
            Self::Action {
                action,
                value: Some(value),
            } => format!("{}({value})", action.label()),
            Self::Action {
                action,
                value: None,
            } => action.label().to_string(),
        }
    }

    /// Translate the step into an engine command for the given mode.
    pub fn to_command(&self, mode: SelectionKind) -> Result<Command, TypeaheadError> {
        match self {
            Self::Attribute { attribute, value } => Command::from_attribute(attribute, value, mode),
            Self::Action {
                action: ScriptAction::Clear,
                ..
            } => Ok(Command::Clear),
            Self::Action {
                action,
                value: Some(value),
            } => Ok(match action {
                ScriptAction::Select => Command::Select(value.clone()),
                ScriptAction::Deselect => Command::Deselect(value.clone()),
                ScriptAction::AddTag => Command::AddTag(value.clone()),
                ScriptAction::RemoveTag => Command::RemoveTag(value.clone()),
                ScriptAction::Clear => Command::Clear,
            }),
            Self::Action {
                action,
                value: None,
            } => Err(TypeaheadError::InvalidAttribute {
                name: action.label().to_string(),
                reason: "action needs a value".to_string(),
            }),
        }
    }
}

const DESCRIBE_WIDTH: usize = 40;

fn abbreviate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{head}...")
}

/// Parse a script from its JSON text.
pub fn parse_script(raw: &str) -> serde_json::Result<Vec<ScriptStep>> {
    serde_json::from_str(raw)
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    /// Queued until a catalog arrives.
    Deferred,
    /// Rejected; the engine is unchanged.
    Failed { error: String },
}

/// Report for one step, with the engine state right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub event: String,
    pub outcome: StepOutcome,
    /// Deferred commands applied as a consequence of this step.
    pub replayed: usize,
    /// Errors from those deferred commands.
    pub replay_failures: Vec<String>,
    pub view: EngineView,
}

impl StepReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, StepOutcome::Failed { .. }) || !self.replay_failures.is_empty()
    }
}

/// Dispatch every step in order, recording the state after each.
///
/// A failing step does not stop the replay.
pub fn run_script(mapper: &mut AttributeMapper, steps: &[ScriptStep]) -> Vec<StepReport> {
    let mut reports = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let event = step.describe();
        let result = step
            .to_command(mapper.engine().kind())
            .and_then(|command| mapper.dispatch(command));
        let (outcome, replayed, replay_failures) = match result {
            Ok(outcome) => {
                let status = match outcome.status {
                    DispatchStatus::Applied => StepOutcome::Applied,
                    DispatchStatus::Deferred => StepOutcome::Deferred,
                };
                let failures: Vec<String> = outcome
                    .replay_failures
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                (status, outcome.replayed, failures)
            }
            Err(err) => {
                warn!(step = index + 1, event = %event, error = %err, "script step rejected");
                (
                    StepOutcome::Failed {
                        error: err.to_string(),
                    },
                    0,
                    Vec::new(),
                )
            }
        };
        debug!(step = index + 1, event = %event, ?outcome, "script step dispatched");
        reports.push(StepReport {
            step: index + 1,
            event,
            outcome,
            replayed,
            replay_failures,
            view: mapper.engine().view(),
        });
    }
    reports
}
