use serde_json::Value;

use valet_core::Paths;
use valet_storage::MemoryStore;

fn open_store() -> anyhow::Result<MemoryStore> {
    let paths = Paths::new();
    MemoryStore::open(&paths.memory_db())
        .map_err(|e| anyhow::anyhow!("Failed to open memory db: {}", e))
}

pub async fn set(key: &str, value: &str, category: &str) -> anyhow::Result<()> {
    let store = open_store()?;

    // "true", "3" and `{"a": 1}` become typed JSON; anything else is a string.
    let value: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    store
        .set_preference(key, &value, category)
        .map_err(|e| anyhow::anyhow!("Failed to set preference: {}", e))?;
    println!("✅ {} = {}", key, value);
    Ok(())
}

pub async fn get(key: &str) -> anyhow::Result<()> {
    let paths = Paths::new();
    if !paths.memory_db().exists() {
        println!("(Memory database not created yet)");
        return Ok(());
    }

    let store = open_store()?;
    match store
        .get_preference(key)
        .map_err(|e| anyhow::anyhow!("Failed to get preference: {}", e))?
    {
        Some(value) => println!("{}", value),
        None => println!("(Preference '{}' is not set)", key),
    }
    Ok(())
}

pub async fn list() -> anyhow::Result<()> {
    let paths = Paths::new();
    if !paths.memory_db().exists() {
        println!("(Memory database not created yet)");
        return Ok(());
    }

    let store = open_store()?;
    let prefs = store
        .list_preferences()
        .map_err(|e| anyhow::anyhow!("Failed to list preferences: {}", e))?;

    println!();
    if prefs.is_empty() {
        println!("(No preferences set)");
    } else {
        println!("⚙️  Preferences ({})", prefs.len());
        println!();
        for (key, value, category) in &prefs {
            println!("  {} = {} [{}]", key, value, category);
        }
    }
    println!();
    Ok(())
}
