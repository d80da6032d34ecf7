use crate::model::{Card, NewCard, StorageError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database at `db_path` (`:memory:` works) and runs migrations.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source TEXT,
                company TEXT,
                event_type TEXT,
                raw_text TEXT,
                published_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cards_source ON cards(source);
            CREATE INDEX IF NOT EXISTS idx_cards_company ON cards(company);
            CREATE INDEX IF NOT EXISTS idx_cards_event_type ON cards(event_type);
            ",
        )?;

        // Columns added after the first schema; older databases get them here.
        Self::migrate_add_column_if_missing(&conn, "cards", "summary", "TEXT")?;
        Self::migrate_add_column_if_missing(&conn, "cards", "url", "TEXT")?;
        Self::migrate_add_column_if_missing(&conn, "cards", "approved", "INTEGER NOT NULL DEFAULT 0")?;
        Self::migrate_add_column_if_missing(&conn, "cards", "metadata", "TEXT")?;

        Ok(Self { conn })
    }

    /// Adds `column` to `table` unless it already exists.
    fn migrate_add_column_if_missing(
        conn: &Connection,
        table: &str,
        column: &str,
        column_def: &str,
    ) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing_columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !existing_columns.iter().any(|c| c == column) {
            let alter_sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def);
            conn.execute(&alter_sql, [])?;
        }

        Ok(())
    }

    /// Inserts a card and returns its id. `published_at` defaults to now.
    pub fn create_card(&self, card: &NewCard) -> Result<i64, StorageError> {
        let published_at = card.published_at.unwrap_or_else(Utc::now);
        let metadata = card
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            "INSERT INTO cards (
                source, company, event_type, raw_text, summary,
                url, published_at, approved, metadata
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &card.source,
                &card.company,
                &card.event_type,
                &card.raw_text,
                &card.summary,
                &card.url,
                &published_at.to_rfc3339(),
                &card.approved,
                &metadata,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns all cards ordered by id.
    pub fn list_cards(&self) -> Result<Vec<Card>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, company, event_type, raw_text, summary,
                    url, published_at, approved, metadata
             FROM cards ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| Self::map_card(row))?;
        let mut cards = Vec::new();
        for card in rows {
            cards.push(card?);
        }

        Ok(cards)
    }

    /// Maps a result row into a `Card`, surfacing bad timestamp or metadata
    /// text as a conversion failure on that column.
    fn map_card(row: &Row) -> Result<Card, rusqlite::Error> {
        let published_at_str: String = row.get(7)?;
        let published_at = DateTime::parse_from_rfc3339(&published_at_str)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&Utc);

        let metadata_str: Option<String> = row.get(9)?;
        let metadata = metadata_str
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(Card {
            id: row.get(0)?,
            source: row.get(1)?,
            company: row.get(2)?,
            event_type: row.get(3)?,
            raw_text: row.get(4)?,
            summary: row.get(5)?,
            url: row.get(6)?,
            published_at,
            approved: row.get(8)?,
            metadata,
        })
    }
}
