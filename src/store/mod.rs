mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Game, GameFields, NewGame};

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    fn list_games(&self) -> Result<Vec<Game>>;
    fn get_game(&self, id: i64) -> Result<Option<Game>>;
    fn create_game(&self, fields: &GameFields) -> Result<Game>;
    /// Overwrites every caller-writable field of the row, refreshing
    /// `updated_at`. Fails with `NotFound` if the id does not exist.
    fn update_game(&self, id: i64, fields: &GameFields) -> Result<Game>;
    fn delete_game(&self, id: i64) -> Result<bool>;

    /// Conjunctive filtered listing. `name` matches as a substring,
    /// `platform` by equality; both already sanitized by the caller.
    fn search_games(&self, name: Option<&str>, platform: Option<&str>) -> Result<Vec<Game>>;

    /// Destructive full replace: deletes every row, resets the id counter,
    /// and bulk-inserts `games`, all in one transaction. Returns the number
    /// of rows inserted.
    fn replace_all(&self, games: &[NewGame]) -> Result<usize>;
}
