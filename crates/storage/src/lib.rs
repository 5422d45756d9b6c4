pub mod memory;

pub use memory::{HistoryRecord, ListParams, MemoryEntry, MemoryStore};
