use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use valet_core::{Error, Result};

/// Importance is a 1-5 scale; out-of-range values are clamped on write.
pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 5;

/// A categorized fact about the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub content: String,
    pub category: String,
    pub importance: i64,
    pub source: String,
    pub version: i64,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A superseded revision of an entry, archived on versioned update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub entry_id: String,
    pub content: String,
    pub version: i64,
    pub archived_at: String,
}

/// Filters for listing memory entries.
pub struct ListParams {
    pub category: Option<String>,
    pub limit: usize,
    pub min_importance: i64,
    pub include_inactive: bool,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            category: None,
            limit: 20,
            min_importance: MIN_IMPORTANCE,
            include_inactive: false,
        }
    }
}

/// Short label shown before each entry in the prompt summary.
fn category_icon(category: &str) -> &'static str {
    match category {
        "work_style" => "💼",
        "preferences" => "⭐",
        "facts" => "📌",
        "context" => "💭",
        _ => "📝",
    }
}

/// SQLite-backed store for user memory entries and preferences.
///
/// Entries are versioned: updating with `save_version` archives the prior
/// content into a history table. Deletes are soft by default. A single
/// logical writer is assumed; the connection mutex serializes calls within
/// the process but nothing stronger is promised.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Connection>>,
}

impl MemoryStore {
    /// Open (or create) the memory database at the given path.
    ///
    /// A file that is not a SQLite database is moved aside to
    /// `<name>.corrupt` and a fresh empty store is created in its place.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create db directory: {}", e))
            })?;
        }

        let conn = match Self::try_open(db_path) {
            Ok(conn) => conn,
            Err(e) => {
                let corrupt = db_path.with_extension("db.corrupt");
                warn!(
                    path = %db_path.display(),
                    moved_to = %corrupt.display(),
                    error = %e,
                    "Memory database unreadable, starting fresh"
                );
                std::fs::rename(db_path, &corrupt).map_err(|e| {
                    Error::Storage(format!("Failed to move corrupt db aside: {}", e))
                })?;
                Self::try_open(db_path)?
            }
        };

        let store = Self {
            inner: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn try_open(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path)
            .map_err(|e| Error::Storage(format!("Failed to open memory db: {}", e)))?;

        // Enable WAL mode for better concurrent read performance. Also
        // forces an actual read of the file, surfacing corruption here
        // rather than on first query.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| Error::Storage(format!("Failed to init memory db: {}", e)))?;
        Ok(conn)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.inner
            .lock()
            .map_err(|e| Error::Storage(format!("Lock error: {}", e)))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS memory_entries (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'general',
                importance INTEGER NOT NULL DEFAULT 1,
                source TEXT NOT NULL DEFAULT 'user',
                version INTEGER NOT NULL DEFAULT 1,
                active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_memory_category ON memory_entries(category);
            CREATE INDEX IF NOT EXISTS idx_memory_importance ON memory_entries(importance);
            CREATE INDEX IF NOT EXISTS idx_memory_active ON memory_entries(active);

            CREATE TABLE IF NOT EXISTS memory_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id TEXT NOT NULL,
                content TEXT NOT NULL,
                version INTEGER NOT NULL,
                archived_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_entry ON memory_history(entry_id);

            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'general',
                updated_at TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| Error::Storage(format!("Failed to init memory schema: {}", e)))?;

        debug!("Memory store schema initialized");
        Ok(())
    }

    /// Add a new entry and return its freshly minted id.
    /// Importance is clamped into [1, 5].
    pub fn add(&self, content: &str, category: &str, importance: i64, source: &str) -> Result<String> {
        let conn = self.lock()?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let importance = importance.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE);

        conn.execute(
            "INSERT INTO memory_entries (id, content, category, importance, source, version, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, 1, ?6, ?6)",
            params![id, content, category, importance, source, now],
        )
        .map_err(|e| Error::Storage(format!("Insert error: {}", e)))?;

        debug!(id = %id, category, importance, "Memory entry added");
        Ok(id)
    }

    /// List entries, active only unless `include_inactive`, ordered by
    /// importance descending then recency descending.
    pub fn list(&self, params: &ListParams) -> Result<Vec<MemoryEntry>> {
        let conn = self.lock()?;

        let mut sql = String::from(
            "SELECT id, content, category, importance, source, version, active, created_at, updated_at
             FROM memory_entries WHERE importance >= ?1",
        );
        let mut bind_values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(params.min_importance)];

        if !params.include_inactive {
            sql.push_str(" AND active = 1");
        }
        if let Some(ref category) = params.category {
            sql.push_str(" AND category = ?2");
            bind_values.push(Box::new(category.clone()));
        }

        sql.push_str(" ORDER BY importance DESC, updated_at DESC");
        sql.push_str(&format!(" LIMIT {}", params.limit.min(i64::MAX as usize)));

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| Error::Storage(format!("Prepare error: {}", e)))?;

        let bind_refs: Vec<&dyn rusqlite::types::ToSql> =
            bind_values.iter().map(|b| b.as_ref()).collect();

        let rows = stmt
            .query_map(bind_refs.as_slice(), row_to_entry)
            .map_err(|e| Error::Storage(format!("Query error: {}", e)))?;

        let mut entries = Vec::new();
        for row in rows {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(error = %e, "Error reading memory row"),
            }
        }
        Ok(entries)
    }

    /// Get a single entry by id, whether active or not.
    pub fn get(&self, id: &str) -> Result<Option<MemoryEntry>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, content, category, importance, source, version, active, created_at, updated_at
             FROM memory_entries WHERE id = ?1",
            params![id],
            row_to_entry,
        )
        .optional()
        .map_err(|e| Error::Storage(format!("Get by id error: {}", e)))
    }

    /// Overwrite an entry's content, bumping its version by exactly 1.
    ///
    /// With `save_version`, the prior content and version are archived to the
    /// history table first. Returns false when the id does not exist; that is
    /// a reported no-op, not an error.
    pub fn update(&self, id: &str, content: &str, save_version: bool) -> Result<bool> {
        let conn = self.lock()?;

        let existing: Option<(String, i64)> = conn
            .query_row(
                "SELECT content, version FROM memory_entries WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| Error::Storage(format!("Query error: {}", e)))?;

        let Some((old_content, old_version)) = existing else {
            debug!(id, "Update of unknown memory entry, nothing to do");
            return Ok(false);
        };

        let now = Utc::now().to_rfc3339();

        if save_version {
            conn.execute(
                "INSERT INTO memory_history (entry_id, content, version, archived_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, old_content, old_version, now],
            )
            .map_err(|e| Error::Storage(format!("History insert error: {}", e)))?;
        }

        conn.execute(
            "UPDATE memory_entries SET content = ?1, version = version + 1, updated_at = ?2 WHERE id = ?3",
            params![content, now, id],
        )
        .map_err(|e| Error::Storage(format!("Update error: {}", e)))?;

        debug!(id, save_version, "Memory entry updated");
        Ok(true)
    }

    /// Delete an entry. Soft delete flips the active flag; the row stays
    /// reachable via `include_inactive`, history and export. Hard delete
    /// removes the row and its history. Returns false when nothing changed:
    /// an unknown id, or a soft delete of an already-inactive entry.
    pub fn delete(&self, id: &str, soft: bool) -> Result<bool> {
        let conn = self.lock()?;

        let affected = if soft {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "UPDATE memory_entries SET active = 0, updated_at = ?1 WHERE id = ?2 AND active = 1",
                params![now, id],
            )
            .map_err(|e| Error::Storage(format!("Soft delete error: {}", e)))?
        } else {
            conn.execute("DELETE FROM memory_history WHERE entry_id = ?1", params![id])
                .map_err(|e| Error::Storage(format!("History delete error: {}", e)))?;
            conn.execute("DELETE FROM memory_entries WHERE id = ?1", params![id])
                .map_err(|e| Error::Storage(format!("Delete error: {}", e)))?
        };

        if affected > 0 {
            info!(id, soft, "Memory entry deleted");
        }
        Ok(affected > 0)
    }

    /// Archived revisions of an entry, oldest first.
    pub fn history(&self, entry_id: &str) -> Result<Vec<HistoryRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT entry_id, content, version, archived_at FROM memory_history
                 WHERE entry_id = ?1 ORDER BY version ASC",
            )
            .map_err(|e| Error::Storage(format!("Prepare error: {}", e)))?;

        let rows = stmt
            .query_map(params![entry_id], |row| {
                Ok(HistoryRecord {
                    entry_id: row.get(0)?,
                    content: row.get(1)?,
                    version: row.get(2)?,
                    archived_at: row.get(3)?,
                })
            })
            .map_err(|e| Error::Storage(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            match row {
                Ok(r) => records.push(r),
                Err(e) => warn!(error = %e, "Error reading history row"),
            }
        }
        Ok(records)
    }

    /// Upsert a preference. Values are stored as JSON text so structures
    /// survive the round trip.
    pub fn set_preference(&self, key: &str, value: &Value, category: &str) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        let serialized = serde_json::to_string(value)?;

        conn.execute(
            "INSERT INTO preferences (key, value, category, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET value = ?2, category = ?3, updated_at = ?4",
            params![key, serialized, category, now],
        )
        .map_err(|e| Error::Storage(format!("Preference upsert error: {}", e)))?;

        debug!(key, category, "Preference set");
        Ok(())
    }

    /// Look up a preference. Stored text that is not valid JSON is returned
    /// as a plain string rather than dropped.
    pub fn get_preference(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::Storage(format!("Preference query error: {}", e)))?;

        Ok(raw.map(|s| serde_json::from_str(&s).unwrap_or(Value::String(s))))
    }

    /// All preferences as (key, value, category), ordered by key.
    pub fn list_preferences(&self) -> Result<Vec<(String, Value, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT key, value, category FROM preferences ORDER BY key")
            .map_err(|e| Error::Storage(format!("Prepare error: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let raw: String = row.get(1)?;
                let category: String = row.get(2)?;
                Ok((key, raw, category))
            })
            .map_err(|e| Error::Storage(format!("Query error: {}", e)))?;

        let mut prefs = Vec::new();
        for row in rows {
            match row {
                Ok((key, raw, category)) => {
                    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
                    prefs.push((key, value, category));
                }
                Err(e) => warn!(error = %e, "Error reading preference row"),
            }
        }
        Ok(prefs)
    }

    /// Render the top entries as a bullet list for system-prompt injection.
    /// Only entries at or above `min_importance` qualify; returns an empty
    /// string when nothing does.
    pub fn summary_for_prompt(&self, max_entries: usize, min_importance: i64) -> Result<String> {
        let entries = self.list(&ListParams {
            limit: max_entries,
            min_importance,
            ..Default::default()
        })?;

        if entries.is_empty() {
            return Ok(String::new());
        }

        let mut lines = vec!["Known about the user:".to_string()];
        for entry in &entries {
            lines.push(format!("{} {}", category_icon(&entry.category), entry.content));
        }
        Ok(lines.join("\n"))
    }

    /// Export everything (including inactive entries) for backup or editing.
    pub fn export(&self) -> Result<Value> {
        let entries = self.list(&ListParams {
            limit: usize::MAX,
            include_inactive: true,
            ..Default::default()
        })?;
        let preferences: serde_json::Map<String, Value> = self
            .list_preferences()?
            .into_iter()
            .map(|(k, v, _)| (k, v))
            .collect();

        Ok(serde_json::json!({
            "entries": entries,
            "preferences": preferences,
            "exported_at": Utc::now().to_rfc3339(),
        }))
    }

    /// Counts for the status/stats surfaces.
    pub fn stats(&self) -> Result<Value> {
        let conn = self.lock()?;

        let active: i64 = conn
            .query_row("SELECT COUNT(*) FROM memory_entries WHERE active = 1", [], |row| row.get(0))
            .unwrap_or(0);
        let inactive: i64 = conn
            .query_row("SELECT COUNT(*) FROM memory_entries WHERE active = 0", [], |row| row.get(0))
            .unwrap_or(0);
        let prefs: i64 = conn
            .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
            .unwrap_or(0);

        let mut by_category = serde_json::Map::new();
        if let Ok(mut stmt) = conn.prepare(
            "SELECT category, COUNT(*) FROM memory_entries WHERE active = 1 GROUP BY category",
        ) {
            if let Ok(rows) = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            }) {
                for row in rows.flatten() {
                    by_category.insert(row.0, Value::from(row.1));
                }
            }
        }

        Ok(serde_json::json!({
            "active": active,
            "inactive": inactive,
            "preferences": prefs,
            "by_category": by_category,
        }))
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemoryEntry> {
    Ok(MemoryEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        category: row.get(2)?,
        importance: row.get(3)?,
        source: row.get(4)?,
        version: row.get(5)?,
        active: row.get::<_, i64>(6)? != 0,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (MemoryStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("memory.db");
        let store = MemoryStore::open(&db_path).unwrap();
        (store, dir)
    }

    #[test]
    fn test_add_clamps_importance() {
        let (store, _dir) = test_store();

        let id = store.add("likes espresso", "facts", 7, "test").unwrap();
        let entry = store.get(&id).unwrap().unwrap();
        assert_eq!(entry.importance, 5);

        let id = store.add("minor detail", "general", -3, "test").unwrap();
        let entry = store.get(&id).unwrap().unwrap();
        assert_eq!(entry.importance, 1);
    }

    #[test]
    fn test_list_ordering_and_filters() {
        let (store, _dir) = test_store();

        store.add("low", "general", 1, "test").unwrap();
        store.add("high", "facts", 5, "test").unwrap();
        store.add("mid", "facts", 3, "test").unwrap();

        let entries = store.list(&ListParams::default()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].content, "high");
        assert_eq!(entries[1].content, "mid");
        assert_eq!(entries[2].content, "low");

        let facts = store
            .list(&ListParams {
                category: Some("facts".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(facts.len(), 2);

        let important = store
            .list(&ListParams {
                min_importance: 3,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(important.len(), 2);

        let limited = store
            .list(&ListParams {
                limit: 1,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].content, "high");
    }

    #[test]
    fn test_update_archives_prior_version() {
        let (store, _dir) = test_store();

        let id = store.add("works at Acme", "facts", 3, "test").unwrap();
        assert!(store.update(&id, "works at Initech", true).unwrap());

        let entry = store.get(&id).unwrap().unwrap();
        assert_eq!(entry.content, "works at Initech");
        assert_eq!(entry.version, 2);

        let history = store.history(&id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "works at Acme");
        assert_eq!(history[0].version, 1);
    }

    #[test]
    fn test_update_without_versioning_keeps_history_empty() {
        let (store, _dir) = test_store();

        let id = store.add("draft", "general", 2, "test").unwrap();
        assert!(store.update(&id, "draft v2", false).unwrap());

        let entry = store.get(&id).unwrap().unwrap();
        assert_eq!(entry.version, 2);
        assert!(store.history(&id).unwrap().is_empty());
    }

    #[test]
    fn test_update_unknown_id_reports_false() {
        let (store, _dir) = test_store();
        assert!(!store.update("no-such-id", "content", true).unwrap());
    }

    #[test]
    fn test_soft_delete_hides_but_keeps_row() {
        let (store, _dir) = test_store();

        let id = store.add("temporary", "context", 2, "test").unwrap();
        assert!(store.delete(&id, true).unwrap());

        let entries = store.list(&ListParams::default()).unwrap();
        assert!(entries.is_empty());

        // Row still exists in storage
        let all = store
            .list(&ListParams {
                include_inactive: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].active);
        assert!(store.get(&id).unwrap().is_some());
    }

    #[test]
    fn test_soft_delete_twice_reports_false_but_keeps_row() {
        let (store, _dir) = test_store();

        let id = store.add("once", "general", 2, "test").unwrap();
        assert!(store.delete(&id, true).unwrap());
        assert!(!store.delete(&id, true).unwrap());

        // The row is still there for history/export, just inactive.
        assert!(!store.get(&id).unwrap().unwrap().active);
    }

    #[test]
    fn test_hard_delete_removes_row_and_history() {
        let (store, _dir) = test_store();

        let id = store.add("v1", "general", 2, "test").unwrap();
        store.update(&id, "v2", true).unwrap();
        assert!(store.delete(&id, false).unwrap());

        assert!(store.get(&id).unwrap().is_none());
        assert!(store.history(&id).unwrap().is_empty());
        assert!(!store.delete(&id, false).unwrap());
    }

    #[test]
    fn test_preference_round_trip() {
        let (store, _dir) = test_store();

        let value = serde_json::json!({"a": 1});
        store.set_preference("k", &value, "general").unwrap();
        assert_eq!(store.get_preference("k").unwrap(), Some(value));

        // Upsert overwrites
        let replacement = serde_json::json!(["x", "y"]);
        store.set_preference("k", &replacement, "general").unwrap();
        assert_eq!(store.get_preference("k").unwrap(), Some(replacement));

        assert_eq!(store.get_preference("missing").unwrap(), None);
    }

    #[test]
    fn test_preference_raw_string_fallback() {
        let (store, _dir) = test_store();

        // Simulate a value written by an older tool that stored plain text.
        {
            let conn = store.inner.lock().unwrap();
            conn.execute(
                "INSERT INTO preferences (key, value, category, updated_at) VALUES ('legacy', 'not json{', 'general', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        }

        assert_eq!(
            store.get_preference("legacy").unwrap(),
            Some(Value::String("not json{".to_string()))
        );
    }

    #[test]
    fn test_summary_for_prompt() {
        let (store, _dir) = test_store();
        assert_eq!(store.summary_for_prompt(10, 2).unwrap(), "");

        store.add("noise", "general", 1, "test").unwrap();
        assert_eq!(store.summary_for_prompt(10, 2).unwrap(), "");

        store.add("prefers dark mode", "preferences", 4, "test").unwrap();
        store.add("works remotely", "work_style", 3, "test").unwrap();

        let summary = store.summary_for_prompt(10, 2).unwrap();
        assert!(summary.starts_with("Known about the user:"));
        assert!(summary.contains("⭐ prefers dark mode"));
        assert!(summary.contains("💼 works remotely"));
        assert!(!summary.contains("noise"));
    }

    #[test]
    fn test_summary_honors_min_importance() {
        let (store, _dir) = test_store();

        store.add("minor habit", "context", 2, "test").unwrap();
        store.add("key fact", "facts", 4, "test").unwrap();

        let summary = store.summary_for_prompt(10, 3).unwrap();
        assert!(summary.contains("key fact"));
        assert!(!summary.contains("minor habit"));
    }

    #[test]
    fn test_export_includes_inactive() {
        let (store, _dir) = test_store();

        let id = store.add("gone soon", "general", 2, "test").unwrap();
        store.delete(&id, true).unwrap();
        store.set_preference("lang", &serde_json::json!("en"), "general").unwrap();

        let export = store.export().unwrap();
        assert_eq!(export["entries"].as_array().unwrap().len(), 1);
        assert_eq!(export["preferences"]["lang"], "en");
    }

    #[test]
    fn test_corrupt_db_yields_fresh_store() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("memory.db");
        std::fs::write(&db_path, "this is not a sqlite database at all!!").unwrap();

        let store = MemoryStore::open(&db_path).unwrap();
        assert!(store.list(&ListParams::default()).unwrap().is_empty());
        assert!(dir.path().join("memory.db.corrupt").exists());
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = test_store();

        store.add("a", "facts", 3, "test").unwrap();
        let id = store.add("b", "general", 2, "test").unwrap();
        store.delete(&id, true).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats["active"], 1);
        assert_eq!(stats["inactive"], 1);
        assert_eq!(stats["by_category"]["facts"], 1);
    }
}
