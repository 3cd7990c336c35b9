use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::{Game, GameFields, NewGame};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

const GAME_COLUMNS: &str = "id, publisher_id, name, platform, store_id, bundle_id, \
                            app_version, is_published, created_at, updated_at";

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        publisher_id: row.get(1)?,
        name: row.get(2)?,
        platform: row.get(3)?,
        store_id: row.get(4)?,
        bundle_id: row.get(5)?,
        app_version: row.get(6)?,
        is_published: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
        updated_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn list_games(&self) -> Result<Vec<Game>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {GAME_COLUMNS} FROM games ORDER BY id"))?;

        let rows = stmt.query_map([], row_to_game)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_game(&self, id: i64) -> Result<Option<Game>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"),
            params![id],
            row_to_game,
        )
        .optional()
        .map_err(Error::from)
    }

    fn create_game(&self, fields: &GameFields) -> Result<Game> {
        let now = Utc::now();
        let platform = fields.platform.as_deref().map(str::to_lowercase);

        let conn = self.conn();
        conn.execute(
            "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version,
                                is_published, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.publisher_id,
                fields.name,
                platform,
                fields.store_id,
                fields.bundle_id,
                fields.app_version,
                fields.is_published,
                format_datetime(&now),
                format_datetime(&now),
            ],
        )?;

        Ok(Game {
            id: conn.last_insert_rowid(),
            publisher_id: fields.publisher_id.clone(),
            name: fields.name.clone(),
            platform,
            store_id: fields.store_id.clone(),
            bundle_id: fields.bundle_id.clone(),
            app_version: fields.app_version.clone(),
            is_published: fields.is_published,
            created_at: now,
            updated_at: now,
        })
    }

    fn update_game(&self, id: i64, fields: &GameFields) -> Result<Game> {
        let now = Utc::now();
        let platform = fields.platform.as_deref().map(str::to_lowercase);

        let rows = self.conn().execute(
            "UPDATE games SET publisher_id = ?1, name = ?2, platform = ?3, store_id = ?4,
                              bundle_id = ?5, app_version = ?6, is_published = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                fields.publisher_id,
                fields.name,
                platform,
                fields.store_id,
                fields.bundle_id,
                fields.app_version,
                fields.is_published,
                format_datetime(&now),
                id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        self.get_game(id)?.ok_or(Error::NotFound)
    }

    fn delete_game(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM games WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn search_games(&self, name: Option<&str>, platform: Option<&str>) -> Result<Vec<Game>> {
        let mut sql = format!("SELECT {GAME_COLUMNS} FROM games");
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = name {
            clauses.push("name LIKE ?");
            values.push(Box::new(format!("%{name}%")));
        }
        if let Some(platform) = platform {
            clauses.push("platform = ?");
            values.push(Box::new(platform.to_string()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter().map(|v| v.as_ref())), row_to_game)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn replace_all(&self, games: &[NewGame]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM games", [])?;
        // Reset the id counter so a replace has truncate semantics.
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'games'", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id,
                                    app_version, is_published, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for game in games {
                stmt.execute(params![
                    game.publisher_id,
                    game.name,
                    game.platform.as_str(),
                    game.store_id,
                    game.bundle_id,
                    game.app_version,
                    game.is_published,
                    format_datetime(&game.created_at),
                    format_datetime(&game.updated_at),
                ])?;
            }
        }

        tx.commit()?;
        Ok(games.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Platform, SourceId};
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn fields(name: &str, platform: &str) -> GameFields {
        GameFields {
            name: Some(name.to_string()),
            platform: Some(platform.to_string()),
            ..GameFields::default()
        }
    }

    fn new_game(name: &str, platform: Platform) -> NewGame {
        let now = Utc::now();
        NewGame {
            publisher_id: Some(SourceId::Text("pub-1".to_string())),
            name: Some(name.to_string()),
            platform,
            store_id: None,
            bundle_id: Some(format!("com.example.{name}")),
            app_version: Some("1.0.0".to_string()),
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_initialize_creates_table() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"games".to_string()));
    }

    #[test]
    fn test_game_crud() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let created = store.create_game(&fields("Helix Jump", "android")).unwrap();
        assert_eq!(created.name.as_deref(), Some("Helix Jump"));
        assert_eq!(created.platform.as_deref(), Some("android"));

        let fetched = store.get_game(created.id).unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Helix Jump"));
        assert_eq!(fetched.created_at.timestamp(), created.created_at.timestamp());

        let updated = store
            .update_game(created.id, &fields("Helix Jump 2", "ios"))
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Helix Jump 2"));
        assert_eq!(updated.platform.as_deref(), Some("ios"));
        // Update overwrites every writable field, including absent ones.
        assert_eq!(updated.publisher_id, None);

        assert!(store.delete_game(created.id).unwrap());
        assert!(store.get_game(created.id).unwrap().is_none());
        assert!(!store.delete_game(created.id).unwrap());
    }

    #[test]
    fn test_update_missing_game_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let err = store.update_game(42, &fields("Ghost", "ios")).unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn test_platform_is_lowercased_on_write() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let created = store.create_game(&fields("Snake", "Android")).unwrap();
        assert_eq!(created.platform.as_deref(), Some("android"));

        let updated = store.update_game(created.id, &fields("Snake", "IOS")).unwrap();
        assert_eq!(updated.platform.as_deref(), Some("ios"));
    }

    #[test]
    fn test_search_by_name_substring() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_game(&fields("Cat Simulator", "android")).unwrap();
        store.create_game(&fields("Super Cat Tales", "ios")).unwrap();
        store.create_game(&fields("Dog Days", "ios")).unwrap();

        let matches = store.search_games(Some("Cat"), None).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|g| g.name.as_deref().unwrap().contains("Cat")));
    }

    #[test]
    fn test_search_by_platform_and_conjunction() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_game(&fields("Cat Simulator", "android")).unwrap();
        store.create_game(&fields("Super Cat Tales", "ios")).unwrap();
        store.create_game(&fields("Dog Days", "ios")).unwrap();

        let ios = store.search_games(None, Some("ios")).unwrap();
        assert_eq!(ios.len(), 2);

        let both = store.search_games(Some("Cat"), Some("ios")).unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name.as_deref(), Some("Super Cat Tales"));

        let none = store.search_games(Some("Zebra"), None).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_without_filters_lists_everything() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_game(&fields("Cat Simulator", "android")).unwrap();
        store.create_game(&fields("Dog Days", "ios")).unwrap();

        let all = store.search_games(None, None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_replace_all_is_a_full_replace() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_game(&fields("Old Game", "android")).unwrap();
        store.create_game(&fields("Older Game", "ios")).unwrap();

        let incoming = vec![
            new_game("Fresh One", Platform::Android),
            new_game("Fresh Two", Platform::Android),
            new_game("Fresh Three", Platform::Ios),
        ];
        let count = store.replace_all(&incoming).unwrap();
        assert_eq!(count, 3);

        let games = store.list_games().unwrap();
        assert_eq!(games.len(), 3);
        assert!(games.iter().all(|g| g.name.as_deref().unwrap().starts_with("Fresh")));
        // Truncate semantics: the id counter restarts.
        assert_eq!(games[0].id, 1);
        assert_eq!(games[0].is_published, Some(true));
    }

    #[test]
    fn test_replace_all_stores_numeric_ids_as_text() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let now = Utc::now();
        let game = NewGame {
            publisher_id: Some(SourceId::Number(284882218)),
            name: Some("Numeric Publisher".to_string()),
            platform: Platform::Android,
            store_id: Some(SourceId::Number(553834731)),
            bundle_id: None,
            app_version: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        store.replace_all(std::slice::from_ref(&game)).unwrap();

        // TEXT affinity converts the integers on storage.
        let stored = &store.list_games().unwrap()[0];
        assert_eq!(stored.publisher_id.as_deref(), Some("284882218"));
        assert_eq!(stored.store_id.as_deref(), Some("553834731"));
    }
}
