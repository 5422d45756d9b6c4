use std::sync::Arc;

use valet_core::{Config, Paths};
use valet_skills::{Dispatcher, Skill, SkillRegistry};

fn registry() -> anyhow::Result<SkillRegistry> {
    let paths = Paths::new();
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    Ok(SkillRegistry::with_defaults(&config, &paths))
}

pub async fn list() -> anyhow::Result<()> {
    let registry = registry()?;
    let skills = registry.list();

    println!();
    if skills.is_empty() {
        println!("(No skills registered)");
    } else {
        println!("🧰 Registered skills ({})", skills.len());
        println!();
        for meta in &skills {
            let confirm = if meta.requires_confirmation { " 🔒" } else { "" };
            println!("  {} — {}{}", meta.id, meta.display_name, confirm);
            println!("     {}", meta.description);
        }
    }
    println!();
    Ok(())
}

pub async fn info(skill_id: &str) -> anyhow::Result<()> {
    let registry = registry()?;
    let Some(skill) = registry.get(skill_id) else {
        println!("Skill '{}' not found. Run `valet skills list`.", skill_id);
        return Ok(());
    };

    let meta = skill.meta();
    println!();
    println!("🧰 {} ({})", meta.display_name, meta.id);
    println!("  {}", meta.description);
    println!("  Requires confirmation: {}", meta.requires_confirmation);
    if meta.triggers.is_empty() {
        println!("  Triggers: (explicit id only)");
    } else {
        println!("  Triggers:");
        for trigger in &meta.triggers {
            println!("    - \"{}\"", trigger);
        }
    }
    println!();
    Ok(())
}

pub async fn prompt() -> anyhow::Result<()> {
    let registry = registry()?;
    let dispatcher = Dispatcher::new(Arc::new(registry));
    println!("{}", dispatcher.skills_prompt());
    Ok(())
}
