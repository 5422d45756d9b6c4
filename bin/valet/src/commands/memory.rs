use valet_core::{Config, Paths};
use valet_storage::{ListParams, MemoryStore};

fn open_store() -> anyhow::Result<MemoryStore> {
    let paths = Paths::new();
    MemoryStore::open(&paths.memory_db())
        .map_err(|e| anyhow::anyhow!("Failed to open memory db: {}", e))
}

/// Open only if the database file already exists, for read-only commands.
fn open_existing() -> anyhow::Result<Option<MemoryStore>> {
    let paths = Paths::new();
    if !paths.memory_db().exists() {
        return Ok(None);
    }
    open_store().map(Some)
}

pub async fn add(content: &str, category: &str, importance: i64) -> anyhow::Result<()> {
    let store = open_store()?;
    let id = store
        .add(content, category, importance, "cli")
        .map_err(|e| anyhow::anyhow!("Failed to add memory: {}", e))?;
    println!("✅ Remembered ({})", id);
    Ok(())
}

pub async fn list(
    category: Option<String>,
    limit: usize,
    min_importance: i64,
    all: bool,
) -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let entries = store
        .list(&ListParams {
            category,
            limit,
            min_importance,
            include_inactive: all,
        })
        .map_err(|e| anyhow::anyhow!("Failed to list memories: {}", e))?;

    println!();
    if entries.is_empty() {
        println!("(No memories found)");
    } else {
        println!("🧠 Memories ({})", entries.len());
        println!();
        for entry in &entries {
            let flag = if entry.active { "" } else { " [deleted]" };
            println!(
                "  [{}] ({}, importance {}, v{}){}",
                entry.id, entry.category, entry.importance, entry.version, flag
            );
            println!("     {}", entry.content);
        }
    }
    println!();
    Ok(())
}

pub async fn update(id: &str, content: &str, save_version: bool) -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let updated = store
        .update(id, content, save_version)
        .map_err(|e| anyhow::anyhow!("Failed to update memory: {}", e))?;

    if updated {
        println!("✅ Updated {}", id);
    } else {
        println!("No memory with id {}", id);
    }
    Ok(())
}

pub async fn delete(id: &str, soft: bool) -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let deleted = store
        .delete(id, soft)
        .map_err(|e| anyhow::anyhow!("Failed to delete memory: {}", e))?;

    if deleted {
        if soft {
            println!("✅ Deleted {} (kept in the database, use --hard to purge)", id);
        } else {
            println!("✅ Permanently deleted {} and its history", id);
        }
        return Ok(());
    }

    // Soft delete reports false for an entry that is already inactive; tell
    // that apart from an id that never existed.
    let exists = store
        .get(id)
        .map_err(|e| anyhow::anyhow!("Failed to look up memory: {}", e))?
        .is_some();
    if exists {
        println!("{} is already deleted (use --hard to purge)", id);
    } else {
        println!("No memory with id {}", id);
    }
    Ok(())
}

pub async fn history(id: &str) -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let records = store
        .history(id)
        .map_err(|e| anyhow::anyhow!("Failed to load history: {}", e))?;

    println!();
    if records.is_empty() {
        println!("(No archived versions for {})", id);
    } else {
        println!("🕘 History for {}", id);
        println!();
        for record in &records {
            println!("  v{} ({})", record.version, record.archived_at);
            println!("     {}", record.content);
        }
    }
    println!();
    Ok(())
}

pub async fn summary() -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let summary = store
        .summary_for_prompt(
            config.memory.summary_max_entries,
            config.memory.summary_min_importance,
        )
        .map_err(|e| anyhow::anyhow!("Failed to build summary: {}", e))?;

    if summary.is_empty() {
        println!("(Nothing important enough to summarize yet)");
    } else {
        println!("{}", summary);
    }
    Ok(())
}

pub async fn export() -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let data = store
        .export()
        .map_err(|e| anyhow::anyhow!("Failed to export: {}", e))?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn stats() -> anyhow::Result<()> {
    let Some(store) = open_existing()? else {
        println!("(Memory database not created yet)");
        return Ok(());
    };

    let stats = store
        .stats()
        .map_err(|e| anyhow::anyhow!("Failed to get stats: {}", e))?;

    println!();
    println!("🧠 Memory statistics");
    println!("  Active entries:  {}", stats["active"]);
    println!("  Deleted entries: {}", stats["inactive"]);
    println!("  Preferences:     {}", stats["preferences"]);
    if let Some(by_category) = stats["by_category"].as_object() {
        if !by_category.is_empty() {
            println!("  By category:");
            for (category, count) in by_category {
                println!("    {:<12} {}", category, count);
            }
        }
    }
    println!();
    Ok(())
}
