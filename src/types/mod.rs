mod models;

pub use models::{Game, GameFields, NewGame, Platform, SourceId};
