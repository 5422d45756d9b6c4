pub mod dispatcher;
pub mod registry;
pub mod units;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use valet_core::{ConversationTurn, Result};

pub use dispatcher::{DispatchRequest, Dispatcher};
pub use registry::SkillRegistry;

/// Callback invoked with a short human-readable status line.
pub type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;
/// Callback invoked with a completion percentage and a status line.
pub type ProgressCallback = Arc<dyn Fn(u8, &str) + Send + Sync>;
/// Callback invoked with intermediate output produced by a skill.
pub type OutputCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Per-dispatch bundle handed to the executing skill. Constructed fresh for
/// every dispatch call; skills only affect the outside world through their
/// return value and these callbacks.
#[derive(Clone, Default)]
pub struct SkillContext {
    pub user_input: String,
    pub session_id: String,
    pub preferences: HashMap<String, Value>,
    pub history: Vec<ConversationTurn>,
    pub on_status: Option<StatusCallback>,
    pub on_progress: Option<ProgressCallback>,
    pub on_output: Option<OutputCallback>,
}

impl SkillContext {
    pub fn status(&self, message: &str) {
        if let Some(cb) = &self.on_status {
            cb(message);
        }
    }

    pub fn progress(&self, percent: u8, message: &str) {
        if let Some(cb) = &self.on_progress {
            cb(percent, message);
        }
    }

    pub fn output(&self, value: &Value) {
        if let Some(cb) = &self.on_output {
            cb(value);
        }
    }
}

/// Outcome of a skill execution. Either success (optionally with payload,
/// message and produced file) or failure with an error message; there is no
/// partial-success state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkillResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SkillResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }
}

/// Serializable skill metadata, for CLI listings and LLM context injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMeta {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub triggers: Vec<String>,
    pub requires_confirmation: bool,
}

/// A self-contained handler for one class of user request.
///
/// Implementations provide identity, trigger phrases and an execution entry
/// point. `validate` is a pure precondition check; `execute` does the work
/// and should return a failure `SkillResult` (or an `Err`, which the
/// dispatcher normalizes) rather than leaving partial state behind as
/// success.
#[async_trait]
pub trait Skill: Send + Sync {
    /// Stable identifier, unique within a registry. Must be non-empty.
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    fn description(&self) -> &str;

    /// Substrings used for naive text matching. A skill with no triggers is
    /// only reachable by explicit id.
    fn triggers(&self) -> Vec<String> {
        Vec::new()
    }

    /// Surfaced to callers so they can confirm before execution.
    fn requires_confirmation(&self) -> bool {
        false
    }

    /// Advisory execution bound in seconds. No watchdog enforces it; skills
    /// are responsible for bounding their own work.
    fn max_execution_time_secs(&self) -> u64 {
        300
    }

    /// Precondition check. Default accepts everything.
    async fn validate(&self, _ctx: &SkillContext) -> Result<()> {
        Ok(())
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<SkillResult>;

    /// Case-insensitive substring test against the trigger list.
    fn matches_trigger(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.triggers()
            .iter()
            .any(|t| !t.is_empty() && text.contains(&t.to_lowercase()))
    }

    fn meta(&self) -> SkillMeta {
        SkillMeta {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            description: self.description().to_string(),
            triggers: self.triggers(),
            requires_confirmation: self.requires_confirmation(),
        }
    }
}
