use rusqlite::{params, Connection};

use crate::metrics::IssueMetrics;
use crate::store::{HistoryEntry, HistoryStore};
use crate::types::{AnalysisOutcome, AuditError, Issue};

/// SQLite-backed implementation of the HistoryStore trait.
pub struct SqliteHistoryStore {
    pub(crate) conn: Connection,
}

impl SqliteHistoryStore {
    /// Open or create a history database at the given path.
    pub fn open(path: &str) -> Result<Self, AuditError> {
        let conn = Connection::open(path)?;
        Self::set_performance_pragmas(&conn)?;
        let store = SqliteHistoryStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory history database (for testing).
    pub fn in_memory() -> Result<Self, AuditError> {
        let conn = Connection::open_in_memory()?;
        Self::set_performance_pragmas(&conn)?;
        let store = SqliteHistoryStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply SQLite performance pragmas for faster reads and writes.
    fn set_performance_pragmas(conn: &Connection) -> Result<(), AuditError> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = -8000;
            PRAGMA temp_store = MEMORY;
            ",
        )?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), AuditError> {
        self.conn.execute_batch(
            "
            -- Full per-URL analysis results
            CREATE TABLE IF NOT EXISTS analysis_history (
                id INTEGER PRIMARY KEY,
                url TEXT NOT NULL,
                accessibility_issues TEXT,
                color_issues TEXT,
                success INTEGER NOT NULL DEFAULT 1,
                error_message TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_history_url ON analysis_history(url);
            CREATE INDEX IF NOT EXISTS idx_history_created ON analysis_history(created_at);

            -- Daily aggregate counts per URL
            CREATE TABLE IF NOT EXISTS issue_metrics (
                id INTEGER PRIMARY KEY,
                url TEXT NOT NULL,
                date TEXT NOT NULL DEFAULT (date('now')),
                total_issues INTEGER NOT NULL DEFAULT 0,
                error_count INTEGER NOT NULL DEFAULT 0,
                warning_count INTEGER NOT NULL DEFAULT 0,
                category_counts TEXT NOT NULL DEFAULT '{}'
            );
            CREATE INDEX IF NOT EXISTS idx_metrics_url ON issue_metrics(url);
            CREATE INDEX IF NOT EXISTS idx_metrics_date ON issue_metrics(url, date);
            ",
        )?;
        Ok(())
    }

    fn issues_to_json(issues: &[Issue]) -> Result<String, AuditError> {
        serde_json::to_string(issues).map_err(|e| AuditError::Database(e.to_string()))
    }

    fn issues_from_json(json: Option<String>) -> Vec<Issue> {
        json.and_then(|j| serde_json::from_str(&j).ok())
            .unwrap_or_default()
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn insert_outcome(&mut self, outcome: &AnalysisOutcome) -> Result<(), AuditError> {
        self.conn.execute(
            "INSERT INTO analysis_history
             (url, accessibility_issues, color_issues, success, error_message)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                outcome.url,
                Self::issues_to_json(&outcome.accessibility)?,
                Self::issues_to_json(&outcome.colors)?,
                outcome.success,
                outcome.error_message,
            ],
        )?;
        Ok(())
    }

    fn insert_metrics(&mut self, metrics: &IssueMetrics) -> Result<(), AuditError> {
        let category_counts = serde_json::to_string(&metrics.category_counts)
            .map_err(|e| AuditError::Database(e.to_string()))?;
        // An empty date resolves to today at insert time.
        self.conn.execute(
            "INSERT INTO issue_metrics
             (url, date, total_issues, error_count, warning_count, category_counts)
             VALUES (?1, COALESCE(NULLIF(?2, ''), date('now')), ?3, ?4, ?5, ?6)",
            params![
                metrics.url,
                metrics.date,
                metrics.total_issues,
                metrics.error_count,
                metrics.warning_count,
                category_counts,
            ],
        )?;
        Ok(())
    }

    fn recent_outcomes(&self, page: u32, per_page: u32) -> Result<Vec<HistoryEntry>, AuditError> {
        // page * per_page can exceed u32, and SQLite binds i64
        let offset = (u64::from(page.max(1)) - 1) * u64::from(per_page);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT id, url, accessibility_issues, color_issues, success, error_message, created_at
             FROM analysis_history
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![per_page, offset], |row| {
            Ok(HistoryEntry {
                id: row.get(0)?,
                created_at: row.get(6)?,
                outcome: AnalysisOutcome {
                    url: row.get(1)?,
                    accessibility: Self::issues_from_json(row.get(2)?),
                    colors: Self::issues_from_json(row.get(3)?),
                    success: row.get(4)?,
                    error_message: row.get(5)?,
                },
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn count_outcomes(&self) -> Result<u64, AuditError> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM analysis_history", [], |row| row.get(0))?;
        Ok(count)
    }

    fn metrics_for_url(&self, url: &str, limit: u32) -> Result<Vec<IssueMetrics>, AuditError> {
        let mut stmt = self.conn.prepare(
            "SELECT url, date, total_issues, error_count, warning_count, category_counts
             FROM issue_metrics
             WHERE url = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![url, limit], |row| {
            let category_json: String = row.get(5)?;
            Ok(IssueMetrics {
                url: row.get(0)?,
                date: row.get(1)?,
                total_issues: row.get(2)?,
                error_count: row.get(3)?,
                warning_count: row.get(4)?,
                category_counts: serde_json::from_str(&category_json).unwrap_or_default(),
            })
        })?;
        let mut metrics = Vec::new();
        for row in rows {
            metrics.push(row?);
        }
        Ok(metrics)
    }

    fn urls_with_metrics(&self) -> Result<Vec<String>, AuditError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT url FROM issue_metrics ORDER BY url")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut urls = Vec::new();
        for row in rows {
            urls.push(row?);
        }
        Ok(urls)
    }
}
