use valet_core::{Config, Paths};
use valet_skills::SkillRegistry;
use valet_storage::MemoryStore;

pub async fn run() -> anyhow::Result<()> {
    let paths = Paths::new();

    println!();
    println!("🗂  Valet status");
    println!();

    if paths.config_file().exists() {
        println!("  Config:    {}", paths.config_file().display());
    } else {
        println!("  Config:    (not found — run `valet onboard`)");
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("  ⚠️  Config failed to load: {}", e);
            println!();
            return Ok(());
        }
    };

    println!("  Workspace: {}", paths.workspace().display());
    println!(
        "  Bridge:    {}",
        config.smart_home.bridge_url.as_deref().unwrap_or("(not configured)")
    );

    let registry = SkillRegistry::with_defaults(&config, &paths);
    println!("  Skills:    {} registered", registry.len());

    let db_path = paths.memory_db();
    if db_path.exists() {
        let store = MemoryStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("Failed to open memory db: {}", e))?;
        let stats = store.stats().map_err(|e| anyhow::anyhow!("Failed to get stats: {}", e))?;
        println!(
            "  Memory:    {} active entries, {} preferences",
            stats["active"], stats["preferences"]
        );
    } else {
        println!("  Memory:    (database not created yet)");
    }

    println!();
    Ok(())
}
