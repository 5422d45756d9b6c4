use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;

use valet_core::{Paths, Result};

use crate::units::{extract_topic, safe_file_stem};
use crate::{Skill, SkillContext, SkillResult};

/// Drafts a LinkedIn post (hook + body + call to action + hashtags) and
/// saves it for review. Publishing is left to the user, hence the
/// confirmation flag.
pub struct LinkedInPostSkill {
    drafts_dir: PathBuf,
}

impl LinkedInPostSkill {
    pub fn new(paths: &Paths) -> Self {
        Self {
            drafts_dir: paths.drafts_dir(),
        }
    }

    fn compose(&self, topic: &str, tone: &str) -> String {
        let hashtags = topic
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .take(3)
            .map(|w| format!("#{}", w.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut post = String::new();
        post.push_str(&format!("Some thoughts on {}.\n\n", topic));
        post.push_str(&format!(
            "Lately I've been working with {topic}, and a few things stood out. \
             (Keep the tone {tone}; replace this paragraph with your own takeaways.)\n\n"
        ));
        post.push_str("What has your experience been? I'd love to hear it in the comments.\n");
        if !hashtags.is_empty() {
            post.push_str(&format!("\n{}\n", hashtags));
        }
        post
    }
}

#[async_trait]
impl Skill for LinkedInPostSkill {
    fn id(&self) -> &str {
        "linkedin"
    }

    fn display_name(&self) -> &str {
        "LinkedIn Assistant"
    }

    fn description(&self) -> &str {
        "Drafts professional LinkedIn posts for review"
    }

    fn triggers(&self) -> Vec<String> {
        vec![
            "linkedin post".to_string(),
            "write linkedin".to_string(),
            "post on linkedin".to_string(),
            "draft a linkedin".to_string(),
        ]
    }

    fn requires_confirmation(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<SkillResult> {
        ctx.status("Analyzing topic...");
        let topic = extract_topic(&ctx.user_input, &self.triggers(), "my recent work");

        let tone = ctx
            .preferences
            .get("linkedin_tone")
            .and_then(|v| v.as_str())
            .unwrap_or("professional")
            .to_string();

        ctx.progress(30, "Writing post...");
        let post = self.compose(&topic, &tone);

        ctx.progress(70, "Saving draft...");
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("linkedin_{}_{}.txt", safe_file_stem(&topic, 20), timestamp);
        let path = self.drafts_dir.join(filename);

        tokio::fs::create_dir_all(&self.drafts_dir).await?;
        tokio::fs::write(&path, &post).await?;

        ctx.progress(100, "Done");
        ctx.output(&serde_json::json!({ "draft": post }));

        Ok(SkillResult::ok("Draft saved; review it before publishing")
            .with_data(serde_json::json!({ "topic": topic, "tone": tone }))
            .with_file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_execute_writes_draft_with_tone_preference() {
        let dir = tempfile::TempDir::new().unwrap();
        let skill = LinkedInPostSkill::new(&Paths::with_base(dir.path().to_path_buf()));

        let mut preferences = HashMap::new();
        preferences.insert("linkedin_tone".to_string(), serde_json::json!("casual"));

        let ctx = SkillContext {
            user_input: "write linkedin about rust performance tuning".to_string(),
            session_id: "test".to_string(),
            preferences,
            ..Default::default()
        };

        let result = skill.execute(&ctx).await.unwrap();
        assert!(result.success);
        assert_eq!(result.data.as_ref().unwrap()["tone"], "casual");

        let content = std::fs::read_to_string(result.file_path.unwrap()).unwrap();
        assert!(content.contains("rust performance tuning"));
        assert!(content.contains("#rust"));
    }

    #[test]
    fn test_requires_confirmation() {
        let dir = tempfile::TempDir::new().unwrap();
        let skill = LinkedInPostSkill::new(&Paths::with_base(dir.path().to_path_buf()));
        assert!(skill.requires_confirmation());
    }
}
