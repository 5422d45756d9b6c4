use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use serde_json::Value;

use valet_core::{Config, Paths};
use valet_skills::{DispatchRequest, Dispatcher, Skill, SkillRegistry};
use valet_storage::MemoryStore;

pub async fn run(text: &str, skill: Option<String>, session: &str, yes: bool) -> anyhow::Result<()> {
    let paths = Paths::new();
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    paths.ensure_dirs()?;

    let store = MemoryStore::open(&paths.memory_db())
        .map_err(|e| anyhow::anyhow!("Failed to open memory db: {}", e))?;

    // Stored preferences, plus the memory summary skills can fold into
    // whatever they generate.
    let mut preferences: HashMap<String, Value> = store
        .list_preferences()
        .map_err(|e| anyhow::anyhow!("Failed to load preferences: {}", e))?
        .into_iter()
        .map(|(key, value, _category)| (key, value))
        .collect();

    let summary = store
        .summary_for_prompt(
            config.memory.summary_max_entries,
            config.memory.summary_min_importance,
        )
        .map_err(|e| anyhow::anyhow!("Failed to build memory summary: {}", e))?;
    if !summary.is_empty() {
        preferences.insert("memory_summary".to_string(), Value::String(summary));
    }

    let registry = Arc::new(SkillRegistry::with_defaults(&config, &paths));

    // Resolve up front so the confirmation flag can be surfaced before
    // anything executes; dispatch resolves the same way.
    let resolved = match &skill {
        Some(id) => registry.get(id),
        None => registry.find_matching(text),
    };
    if let Some(target) = &resolved {
        if target.requires_confirmation() && !yes {
            print!("{} requires confirmation. Proceed? [y/N] ", target.display_name());
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Aborted.");
                return Ok(());
            }
        }
    }

    let dispatcher = Dispatcher::new(registry)
        .on_status(Arc::new(|msg: &str| println!("· {}", msg)))
        .on_progress(Arc::new(|pct: u8, msg: &str| println!("· [{:>3}%] {}", pct, msg)))
        .on_output(Arc::new(|value: &Value| {
            if let Ok(pretty) = serde_json::to_string_pretty(value) {
                println!("{}", pretty);
            }
        }));

    let request = DispatchRequest {
        user_input: text.to_string(),
        session_id: session.to_string(),
        preferences,
        history: Vec::new(),
        skill_id: skill,
    };

    let result = dispatcher.dispatch(request).await;

    println!();
    if result.success {
        println!("✅ {}", result.message);
        if let Some(path) = &result.file_path {
            println!("   File: {}", path.display());
        }
    } else {
        println!("❌ {}", result.error.as_deref().unwrap_or("Skill failed"));
        std::process::exit(1);
    }

    Ok(())
}
