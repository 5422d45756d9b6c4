pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use config::{Config, MemoryConfig, ReportConfig, SmartHomeConfig};
pub use error::{Error, Result};
pub use paths::Paths;
pub use types::ConversationTurn;
