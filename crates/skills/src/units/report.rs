use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;

use valet_core::{Config, Paths, Result};

use crate::units::{extract_topic, safe_file_stem};
use crate::{Skill, SkillContext, SkillResult};

/// Compiles a markdown report from the request and recent conversation
/// context, and writes it into the configured reports directory.
pub struct ReportSkill {
    output_dir: PathBuf,
}

impl ReportSkill {
    pub fn new(config: &Config, paths: &Paths) -> Self {
        let output_dir = config
            .reports
            .output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| paths.reports_dir());
        Self { output_dir }
    }

    fn render(&self, topic: &str, ctx: &SkillContext) -> String {
        let mut doc = String::new();
        doc.push_str(&format!("# Report: {}\n\n", topic));
        doc.push_str(&format!("Generated: {}\n\n", Local::now().format("%Y-%m-%d %H:%M")));
        doc.push_str(&format!("Session: {}\n\n", ctx.session_id));

        doc.push_str("## Request\n\n");
        doc.push_str(ctx.user_input.trim());
        doc.push_str("\n\n");

        let recent: Vec<_> = ctx.history.iter().rev().take(5).collect();
        if !recent.is_empty() {
            doc.push_str("## Recent context\n\n");
            for turn in recent.iter().rev() {
                doc.push_str(&format!("- **{}**: {}\n", turn.role, turn.content));
            }
            doc.push('\n');
        }

        doc.push_str("## Summary\n\n");
        doc.push_str(&format!(
            "_Draft compiled from the notes above on \"{}\". Fill in findings and conclusions before sharing._\n",
            topic
        ));
        doc
    }
}

#[async_trait]
impl Skill for ReportSkill {
    fn id(&self) -> &str {
        "report"
    }

    fn display_name(&self) -> &str {
        "Report Compiler"
    }

    fn description(&self) -> &str {
        "Compiles reports from notes and conversation context"
    }

    fn triggers(&self) -> Vec<String> {
        vec![
            "write report".to_string(),
            "compile report".to_string(),
            "create report".to_string(),
            "make a report".to_string(),
            "summarize notes".to_string(),
        ]
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<SkillResult> {
        ctx.status("Analyzing content...");
        let topic = extract_topic(&ctx.user_input, &self.triggers(), "notes");

        ctx.progress(20, "Structuring report...");
        let content = self.render(&topic, ctx);

        ctx.progress(60, "Writing report...");
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("report_{}_{}.md", safe_file_stem(&topic, 30), timestamp);
        let path = self.output_dir.join(filename);

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, &content).await?;

        ctx.progress(100, "Done");
        ctx.status("Report saved");

        let words = content.split_whitespace().count();
        Ok(SkillResult::ok(format!("Report created: {}", path.display()))
            .with_data(serde_json::json!({
                "topic": topic,
                "format": "markdown",
                "words": words,
            }))
            .with_file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valet_core::ConversationTurn;

    fn skill_in(dir: &std::path::Path) -> ReportSkill {
        let mut config = Config::default();
        config.reports.output_dir = Some(dir.to_string_lossy().to_string());
        ReportSkill::new(&config, &Paths::with_base(dir.join("base")))
    }

    #[tokio::test]
    async fn test_execute_writes_markdown_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let skill = skill_in(dir.path());

        let ctx = SkillContext {
            user_input: "write report about quarterly sales".to_string(),
            session_id: "test".to_string(),
            history: vec![ConversationTurn::new("user", "sales were up 12%")],
            ..Default::default()
        };

        let result = skill.execute(&ctx).await.unwrap();
        assert!(result.success);

        let path = result.file_path.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Report: quarterly sales"));
        assert!(content.contains("sales were up 12%"));
        assert_eq!(result.data.unwrap()["topic"], "quarterly sales");
    }

    #[test]
    fn test_trigger_matching() {
        let dir = tempfile::TempDir::new().unwrap();
        let skill = skill_in(dir.path());
        assert!(skill.matches_trigger("Could you WRITE REPORT on this?"));
        assert!(!skill.matches_trigger("turn on the light"));
    }
}
