use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use serde_json::Value;
use valet_core::ConversationTurn;

use crate::registry::SkillRegistry;
use crate::{OutputCallback, ProgressCallback, SkillContext, SkillMeta, SkillResult, StatusCallback};

/// Inputs for one dispatch call.
#[derive(Default)]
pub struct DispatchRequest {
    pub user_input: String,
    pub session_id: String,
    pub preferences: HashMap<String, Value>,
    pub history: Vec<ConversationTurn>,
    /// Explicit skill id; takes precedence over trigger matching.
    pub skill_id: Option<String>,
}

impl DispatchRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            session_id: "default".to_string(),
            ..Default::default()
        }
    }
}

/// Resolves free text (or an explicit id) to a skill and drives its
/// execution. All failure modes come back as a failure `SkillResult`;
/// `dispatch` never returns an error.
///
/// The registry is an injected dependency so lifecycle and testing stay
/// explicit; there is no process-wide dispatcher.
pub struct Dispatcher {
    registry: Arc<SkillRegistry>,
    on_status: Option<StatusCallback>,
    on_progress: Option<ProgressCallback>,
    on_output: Option<OutputCallback>,
    cancelled: AtomicBool,
}

impl Dispatcher {
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self {
            registry,
            on_status: None,
            on_progress: None,
            on_output: None,
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn on_status(mut self, cb: StatusCallback) -> Self {
        self.on_status = Some(cb);
        self
    }

    pub fn on_progress(mut self, cb: ProgressCallback) -> Self {
        self.on_progress = Some(cb);
        self
    }

    pub fn on_output(mut self, cb: OutputCallback) -> Self {
        self.on_output = Some(cb);
        self
    }

    /// Request cancellation of the current dispatch.
    ///
    /// Cooperative and non-preemptive: the flag is only consulted after the
    /// skill's `execute` returns, so an in-flight external call is never
    /// interrupted. A cancelled dispatch reports failure even if the skill
    /// completed its work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub async fn dispatch(&self, request: DispatchRequest) -> SkillResult {
        self.cancelled.store(false, Ordering::SeqCst);

        // Explicit id takes precedence over trigger matching.
        let skill = if let Some(ref id) = request.skill_id {
            match self.registry.get(id) {
                Some(skill) => skill,
                None => return SkillResult::fail(format!("Skill '{}' not found", id)),
            }
        } else {
            match self.registry.find_matching(&request.user_input) {
                Some(skill) => skill,
                None => return SkillResult::fail("No matching skill found for this request"),
            }
        };

        debug!(skill = skill.id(), session = %request.session_id, "Dispatching");

        let ctx = SkillContext {
            user_input: request.user_input,
            session_id: request.session_id,
            preferences: request.preferences,
            history: request.history,
            on_status: self.on_status.clone(),
            on_progress: self.on_progress.clone(),
            on_output: self.on_output.clone(),
        };

        // Validation failure short-circuits before any side effect.
        if let Err(e) = skill.validate(&ctx).await {
            return SkillResult::fail(e.to_string());
        }

        ctx.status(&format!("Running {}...", skill.display_name()));

        let result = match skill.execute(&ctx).await {
            Ok(result) => result,
            Err(e) => {
                warn!(skill = skill.id(), error = %e, "Skill execution failed");
                SkillResult::fail(format!("Skill execution failed: {}", e))
            }
        };

        if self.cancelled.load(Ordering::SeqCst) {
            return SkillResult::fail("Skill execution was cancelled");
        }

        result
    }

    /// Metadata for all registered skills.
    pub fn available_skills(&self) -> Vec<SkillMeta> {
        self.registry.list()
    }

    /// Human-readable skill list for LLM system-prompt injection.
    pub fn skills_prompt(&self) -> String {
        let skills = self.registry.list();
        if skills.is_empty() {
            return "No skills are currently available.".to_string();
        }

        let mut lines = vec!["Available skills:".to_string()];
        for skill in &skills {
            let triggers = skill
                .triggers
                .iter()
                .take(3)
                .map(|t| format!("\"{}\"", t))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("- {}: {}", skill.display_name, skill.description));
            if !triggers.is_empty() {
                lines.push(format!("  Triggers: {}", triggers));
            }
        }
        lines.join("\n")
    }
}
