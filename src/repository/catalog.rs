//! Console and genre methods on Repository

use serde_json::json;

use super::{to_document, Collection, Filter, Repository, StoreError};
use crate::models::{Console, Genre, ObjectId};

fn name_update(name: &str) -> Result<super::Document, StoreError> {
    to_document(&json!({ "name": name }))
}

impl Repository {
    /// List all consoles in insertion order
    pub async fn consoles_list(&self) -> Result<Vec<Console>, StoreError> {
        self.list(Collection::Consoles, Filter::all()).await
    }

    pub async fn consoles_get_by_id(&self, id: ObjectId) -> Result<Option<Console>, StoreError> {
        self.get(Collection::Consoles, id).await
    }

    /// Find a console by its normalized name
    pub async fn consoles_find_by_name(&self, name: &str) -> Result<Option<Console>, StoreError> {
        self.first(Collection::Consoles, Filter::all().eq("name", name)).await
    }

    pub async fn consoles_create(&self, console: &Console) -> Result<(), StoreError> {
        self.create(Collection::Consoles, console).await
    }

    pub async fn consoles_rename(&self, id: ObjectId, name: &str) -> Result<Option<Console>, StoreError> {
        self.update(Collection::Consoles, id, name_update(name)?).await
    }

    pub async fn consoles_delete(&self, id: ObjectId) -> Result<Option<Console>, StoreError> {
        self.remove(Collection::Consoles, id).await
    }

    /// List all genres in insertion order
    pub async fn genres_list(&self) -> Result<Vec<Genre>, StoreError> {
        self.list(Collection::Genres, Filter::all()).await
    }

    pub async fn genres_get_by_id(&self, id: ObjectId) -> Result<Option<Genre>, StoreError> {
        self.get(Collection::Genres, id).await
    }

    /// Find a genre by its normalized name
    pub async fn genres_find_by_name(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        self.first(Collection::Genres, Filter::all().eq("name", name)).await
    }

    pub async fn genres_create(&self, genre: &Genre) -> Result<(), StoreError> {
        self.create(Collection::Genres, genre).await
    }

    pub async fn genres_rename(&self, id: ObjectId, name: &str) -> Result<Option<Genre>, StoreError> {
        self.update(Collection::Genres, id, name_update(name)?).await
    }

    pub async fn genres_delete(&self, id: ObjectId) -> Result<Option<Genre>, StoreError> {
        self.remove(Collection::Genres, id).await
    }
}
