//! Game inventory service

use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        game::{start_case, CreateGame, GameQuery, UpdateGame},
        CatalogSnapshot, Game, ObjectId,
    },
    repository::{to_document, Repository},
};

#[derive(Clone)]
pub struct GamesService {
    repository: Repository,
}

fn missing_game() -> AppError {
    AppError::NotFound("Game with the given id does not exist.".to_string())
}

impl GamesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    async fn console_snapshot(&self, id: ObjectId) -> AppResult<CatalogSnapshot> {
        self.repository
            .consoles_get_by_id(id)
            .await?
            .map(|console| CatalogSnapshot::from(&console))
            .ok_or_else(|| AppError::NotFound("Console with the given id does not exist.".to_string()))
    }

    async fn genre_snapshot(&self, id: ObjectId) -> AppResult<CatalogSnapshot> {
        self.repository
            .genres_get_by_id(id)
            .await?
            .map(|genre| CatalogSnapshot::from(&genre))
            .ok_or_else(|| AppError::NotFound("Genre with the given id does not exist.".to_string()))
    }

    /// List games sorted by genre name
    pub async fn list(&self, query: &GameQuery) -> AppResult<Vec<Game>> {
        Ok(self.repository.games_list(query).await?)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Game> {
        self.repository.games_get_by_id(id).await?.ok_or_else(missing_game)
    }

    /// Create a game, embedding snapshots of its console and genre
    pub async fn create(&self, data: &CreateGame) -> AppResult<Game> {
        let console = self.console_snapshot(data.console_id).await?;
        let genre = self.genre_snapshot(data.genre_id).await?;

        let game = Game {
            id: ObjectId::new(),
            title: start_case(&data.title),
            console,
            genre,
            number_in_stock: data.number_in_stock,
            daily_rental_rate: data.daily_rental_rate,
        };
        self.repository.games_create(&game).await?;
        tracing::info!(id = %game.id, title = %game.title, "Game created");
        Ok(game)
    }

    /// Update a game; console and genre snapshots change only when their id is given
    pub async fn update(&self, id: ObjectId, data: &UpdateGame) -> AppResult<Game> {
        let mut set = to_document(&json!({
            "title": start_case(&data.title),
            "numberInStock": data.number_in_stock,
            "dailyRentalRate": data.daily_rental_rate,
        }))?;
        if let Some(console_id) = data.console_id {
            let snapshot = self.console_snapshot(console_id).await?;
            set.insert("console".into(), Value::Object(to_document(&snapshot)?));
        }
        if let Some(genre_id) = data.genre_id {
            let snapshot = self.genre_snapshot(genre_id).await?;
            set.insert("genre".into(), Value::Object(to_document(&snapshot)?));
        }

        self.repository.games_update(id, set).await?.ok_or_else(missing_game)
    }

    pub async fn delete(&self, id: ObjectId) -> AppResult<Game> {
        self.repository.games_delete(id).await?.ok_or_else(missing_game)
    }
}
