mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "valet")]
#[command(about = "A personal assistant with skills and memory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize valet configuration and workspace
    Onboard {
        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration status
    Status,

    /// Manage registered skills
    Skills {
        #[command(subcommand)]
        command: SkillsCommands,
    },

    /// Dispatch a request to the matching skill
    Run {
        /// The request text
        text: String,

        /// Explicit skill id (skips trigger matching)
        #[arg(short, long)]
        skill: Option<String>,

        /// Session ID
        #[arg(long, default_value = "cli:default")]
        session: String,

        /// Skip the confirmation prompt for skills that require one
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage the memory store
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },

    /// Manage user preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[derive(Subcommand)]
enum SkillsCommands {
    /// List all registered skills
    List,
    /// Show detailed info for a specific skill
    Info {
        /// Skill id
        skill_id: String,
    },
    /// Print the skill list as rendered for an LLM system prompt
    Prompt,
}

#[derive(Subcommand)]
enum MemoryCommands {
    /// Add a memory entry
    Add {
        /// The fact to remember
        content: String,
        /// Category (general, work_style, preferences, facts, context)
        #[arg(long, default_value = "general")]
        category: String,
        /// Importance 1-5 (clamped)
        #[arg(long, default_value = "1")]
        importance: i64,
    },
    /// List memory entries
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Max entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Minimum importance
        #[arg(long, default_value = "1")]
        min_importance: i64,
        /// Include soft-deleted entries
        #[arg(long)]
        all: bool,
    },
    /// Update an entry's content (archives the prior version)
    Update {
        /// Entry id
        id: String,
        /// New content
        content: String,
        /// Skip archiving the prior version
        #[arg(long)]
        no_version: bool,
    },
    /// Delete an entry (soft by default)
    Delete {
        /// Entry id
        id: String,
        /// Remove the row and its history permanently
        #[arg(long)]
        hard: bool,
    },
    /// Show archived versions of an entry
    History {
        /// Entry id
        id: String,
    },
    /// Show the prompt summary built from memory
    Summary,
    /// Export all memory data as JSON
    Export,
    /// Show memory statistics
    Stats,
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Set a preference (value parsed as JSON, else stored as string)
    Set {
        key: String,
        value: String,
        /// Category tag
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Get a preference
    Get { key: String },
    /// List all preferences
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::Onboard { force } => commands::onboard::run(force).await,
        Commands::Status => commands::status::run().await,
        Commands::Skills { command } => match command {
            SkillsCommands::List => commands::skills::list().await,
            SkillsCommands::Info { skill_id } => commands::skills::info(&skill_id).await,
            SkillsCommands::Prompt => commands::skills::prompt().await,
        },
        Commands::Run { text, skill, session, yes } => {
            commands::run_cmd::run(&text, skill, &session, yes).await
        }
        Commands::Memory { command } => match command {
            MemoryCommands::Add { content, category, importance } => {
                commands::memory::add(&content, &category, importance).await
            }
            MemoryCommands::List { category, limit, min_importance, all } => {
                commands::memory::list(category, limit, min_importance, all).await
            }
            MemoryCommands::Update { id, content, no_version } => {
                commands::memory::update(&id, &content, !no_version).await
            }
            MemoryCommands::Delete { id, hard } => commands::memory::delete(&id, !hard).await,
            MemoryCommands::History { id } => commands::memory::history(&id).await,
            MemoryCommands::Summary => commands::memory::summary().await,
            MemoryCommands::Export => commands::memory::export().await,
            MemoryCommands::Stats => commands::memory::stats().await,
        },
        Commands::Prefs { command } => match command {
            PrefsCommands::Set { key, value, category } => {
                commands::prefs::set(&key, &value, &category).await
            }
            PrefsCommands::Get { key } => commands::prefs::get(&key).await,
            PrefsCommands::List => commands::prefs::list().await,
        },
    }
}
