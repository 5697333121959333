//! Game methods on Repository

use super::{Collection, Document, Filter, Repository, SortOrder, StoreError};
use crate::models::{game::GameQuery, Game, ObjectId};

impl Repository {
    /// List games sorted by genre name, optionally filtered by snapshot names
    pub async fn games_list(&self, query: &GameQuery) -> Result<Vec<Game>, StoreError> {
        let mut filter = Filter::all().sort("genre.name", SortOrder::Ascending);
        if let Some(console) = &query.console {
            filter = filter.eq("console.name", console.as_str());
        }
        if let Some(genre) = &query.genre {
            filter = filter.eq("genre.name", genre.as_str());
        }
        self.list(Collection::Games, filter).await
    }

    pub async fn games_get_by_id(&self, id: ObjectId) -> Result<Option<Game>, StoreError> {
        self.get(Collection::Games, id).await
    }

    pub async fn games_create(&self, game: &Game) -> Result<(), StoreError> {
        self.create(Collection::Games, game).await
    }

    /// Replace the given top-level fields of a game
    pub async fn games_update(&self, id: ObjectId, set: Document) -> Result<Option<Game>, StoreError> {
        self.update(Collection::Games, id, set).await
    }

    pub async fn games_delete(&self, id: ObjectId) -> Result<Option<Game>, StoreError> {
        self.remove(Collection::Games, id).await
    }
}
