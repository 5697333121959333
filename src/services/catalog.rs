//! Console and genre reference data service

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        catalog::{normalize_catalog_name, CatalogNameInput},
        CatalogKind, Console, Genre, ObjectId,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

fn missing(kind: CatalogKind) -> AppError {
    AppError::NotFound(format!("{} with the given id does not exist.", kind.label()))
}

fn taken(kind: CatalogKind) -> AppError {
    AppError::Conflict(format!("{} already exists.", kind.label()))
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    fn normalize(&self, kind: CatalogKind, input: &CatalogNameInput) -> AppResult<String> {
        let allowed = match kind {
            CatalogKind::Console => &self.config.valid_consoles,
            CatalogKind::Genre => &self.config.valid_genres,
        };
        normalize_catalog_name(kind, &input.name, allowed)
    }

    // Consoles

    pub async fn list_consoles(&self) -> AppResult<Vec<Console>> {
        Ok(self.repository.consoles_list().await?)
    }

    pub async fn get_console(&self, id: ObjectId) -> AppResult<Console> {
        self.repository
            .consoles_get_by_id(id)
            .await?
            .ok_or_else(|| missing(CatalogKind::Console))
    }

    pub async fn create_console(&self, input: &CatalogNameInput) -> AppResult<Console> {
        let name = self.normalize(CatalogKind::Console, input)?;
        if self.repository.consoles_find_by_name(&name).await?.is_some() {
            return Err(taken(CatalogKind::Console));
        }

        let console = Console { id: ObjectId::new(), name };
        self.repository.consoles_create(&console).await?;
        tracing::info!(id = %console.id, name = %console.name, "Console created");
        Ok(console)
    }

    pub async fn rename_console(&self, id: ObjectId, input: &CatalogNameInput) -> AppResult<Console> {
        let name = self.normalize(CatalogKind::Console, input)?;
        if let Some(other) = self.repository.consoles_find_by_name(&name).await? {
            if other.id != id {
                return Err(taken(CatalogKind::Console));
            }
        }

        self.repository
            .consoles_rename(id, &name)
            .await?
            .ok_or_else(|| missing(CatalogKind::Console))
    }

    pub async fn delete_console(&self, id: ObjectId) -> AppResult<Console> {
        self.repository
            .consoles_delete(id)
            .await?
            .ok_or_else(|| missing(CatalogKind::Console))
    }

    // Genres

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.repository.genres_list().await?)
    }

    pub async fn get_genre(&self, id: ObjectId) -> AppResult<Genre> {
        self.repository
            .genres_get_by_id(id)
            .await?
            .ok_or_else(|| missing(CatalogKind::Genre))
    }

    pub async fn create_genre(&self, input: &CatalogNameInput) -> AppResult<Genre> {
        let name = self.normalize(CatalogKind::Genre, input)?;
        if self.repository.genres_find_by_name(&name).await?.is_some() {
            return Err(taken(CatalogKind::Genre));
        }

        let genre = Genre { id: ObjectId::new(), name };
        self.repository.genres_create(&genre).await?;
        tracing::info!(id = %genre.id, name = %genre.name, "Genre created");
        Ok(genre)
    }

    pub async fn rename_genre(&self, id: ObjectId, input: &CatalogNameInput) -> AppResult<Genre> {
        let name = self.normalize(CatalogKind::Genre, input)?;
        if let Some(other) = self.repository.genres_find_by_name(&name).await? {
            if other.id != id {
                return Err(taken(CatalogKind::Genre));
            }
        }

        self.repository
            .genres_rename(id, &name)
            .await?
            .ok_or_else(|| missing(CatalogKind::Genre))
    }

    pub async fn delete_genre(&self, id: ObjectId) -> AppResult<Genre> {
        self.repository
            .genres_delete(id)
            .await?
            .ok_or_else(|| missing(CatalogKind::Genre))
    }
}
