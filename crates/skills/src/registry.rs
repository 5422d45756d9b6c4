use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use valet_core::{Config, Paths};

use crate::units::linkedin::LinkedInPostSkill;
use crate::units::report::ReportSkill;
use crate::units::smart_home::SmartHomeSkill;
use crate::{Skill, SkillMeta};

/// Holds all registered skills, indexed by id and kept in registration
/// order. Registration is an explicit static list rather than any kind of
/// discovery, so the order (and therefore trigger tie-breaking) is
/// deterministic across runs.
pub struct SkillRegistry {
    skills: HashMap<String, Arc<dyn Skill>>,
    order: Vec<String>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register the built-in skills against the given config.
    pub fn with_defaults(config: &Config, paths: &Paths) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ReportSkill::new(config, paths)));
        registry.register(Arc::new(SmartHomeSkill::new(config)));
        registry.register(Arc::new(LinkedInPostSkill::new(paths)));
        registry
    }

    /// Add a skill under its id. A skill with an empty id is logged and
    /// skipped; a duplicate id overwrites the earlier registration (last
    /// wins), which is logged as a warning.
    pub fn register(&mut self, skill: Arc<dyn Skill>) {
        let id = skill.id().to_string();
        if id.is_empty() {
            warn!("Skipping skill registration with empty id");
            return;
        }
        if self.skills.insert(id.clone(), skill).is_some() {
            warn!(id = %id, "Duplicate skill id, overwriting earlier registration");
        } else {
            debug!(id = %id, "Registering skill");
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Skill>> {
        self.skills.get(id).cloned()
    }

    /// Find the skill whose trigger best matches the input text.
    ///
    /// Policy: among skills with at least one case-insensitive substring hit,
    /// the longest matching trigger wins; ties go to the earlier
    /// registration. (The length tie-break keeps "turn on the light" from
    /// being claimed by a skill that merely triggers on "on".)
    pub fn find_matching(&self, text: &str) -> Option<Arc<dyn Skill>> {
        let lowered = text.to_lowercase();
        let mut best: Option<(usize, Arc<dyn Skill>)> = None;

        for id in &self.order {
            let Some(skill) = self.skills.get(id) else {
                continue;
            };
            let hit = skill
                .triggers()
                .iter()
                .filter(|t| !t.is_empty() && lowered.contains(&t.to_lowercase()))
                .map(|t| t.chars().count())
                .max();

            if let Some(len) = hit {
                let better = match &best {
                    Some((best_len, _)) => len > *best_len,
                    None => true,
                };
                if better {
                    best = Some((len, skill.clone()));
                }
            }
        }

        best.map(|(_, skill)| skill)
    }

    /// Metadata for all skills in registration order.
    pub fn list(&self) -> Vec<SkillMeta> {
        self.order
            .iter()
            .filter_map(|id| self.skills.get(id))
            .map(|skill| skill.meta())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SkillContext, SkillResult};
    use async_trait::async_trait;
    use valet_core::Result;

    struct FakeSkill {
        id: &'static str,
        triggers: Vec<String>,
    }

    impl FakeSkill {
        fn new(id: &'static str, triggers: &[&str]) -> Self {
            Self {
                id,
                triggers: triggers.iter().map(|t| t.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl Skill for FakeSkill {
        fn id(&self) -> &str {
            self.id
        }
        fn display_name(&self) -> &str {
            self.id
        }
        fn description(&self) -> &str {
            "fake"
        }
        fn triggers(&self) -> Vec<String> {
            self.triggers.clone()
        }
        async fn execute(&self, _ctx: &SkillContext) -> Result<SkillResult> {
            Ok(SkillResult::ok("done"))
        }
    }

    #[test]
    fn test_get_exact_lookup() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("alpha", &["alpha"])));
        assert!(reg.get("alpha").is_some());
        assert!(reg.get("beta").is_none());
    }

    #[test]
    fn test_find_matching_single_trigger() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("a", &["alpha"])));
        reg.register(Arc::new(FakeSkill::new("b", &["beta"])));

        let hit = reg.find_matching("please ALPHA now").unwrap();
        assert_eq!(hit.id(), "a");
        assert!(reg.find_matching("nothing here").is_none());
    }

    #[test]
    fn test_find_matching_prefers_longest_trigger() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("generic", &["on"])));
        reg.register(Arc::new(FakeSkill::new("lights", &["turn on the light"])));

        let hit = reg.find_matching("turn on the light in the kitchen").unwrap();
        assert_eq!(hit.id(), "lights");
    }

    #[test]
    fn test_find_matching_tie_goes_to_first_registered() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("first", &["hello"])));
        reg.register(Arc::new(FakeSkill::new("second", &["howdy"])));

        let hit = reg.find_matching("hello and howdy").unwrap();
        assert_eq!(hit.id(), "first");
    }

    #[test]
    fn test_empty_triggers_only_reachable_by_id() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("hidden", &[])));

        assert!(reg.find_matching("hidden").is_none());
        assert!(reg.get("hidden").is_some());
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("dup", &["one"])));
        reg.register(Arc::new(FakeSkill::new("dup", &["two"])));

        assert_eq!(reg.len(), 1);
        let skill = reg.get("dup").unwrap();
        assert_eq!(skill.triggers(), vec!["two".to_string()]);
    }

    #[test]
    fn test_empty_id_skipped() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("", &["x"])));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut reg = SkillRegistry::new();
        reg.register(Arc::new(FakeSkill::new("z", &[])));
        reg.register(Arc::new(FakeSkill::new("a", &[])));

        let metas = reg.list();
        assert_eq!(metas[0].id, "z");
        assert_eq!(metas[1].id, "a");
    }
}
