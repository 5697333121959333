//! Rental lifecycle: opening rentals and processing returns

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{rental::RentalRequest, ObjectId, Rental},
    repository::{rentals::MAX_STOCK, Collection, Repository, StoreError},
};

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

fn out_of_stock() -> AppError {
    AppError::OutOfStock("Game not in stock.".to_string())
}

fn already_returned() -> AppError {
    AppError::AlreadyReturned("Return already processed.".to_string())
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List rentals, most recent first
    pub async fn list(&self) -> AppResult<Vec<Rental>> {
        Ok(self.repository.rentals_list().await?)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Rental> {
        self.repository
            .rentals_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental with the given id does not exist.".to_string()))
    }

    /// Rent one copy of a game to a customer.
    ///
    /// The rental insert and the stock decrement commit together; the
    /// decrement is guarded so stock never drops below zero even when
    /// several requests race for the last copy.
    pub async fn create_rental(&self, request: &RentalRequest) -> AppResult<Rental> {
        let customer = self
            .repository
            .customers_get_by_id(request.customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid customer.".to_string()))?;
        let game = self
            .repository
            .games_get_by_id(request.game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid game.".to_string()))?;

        if game.number_in_stock <= 0 {
            return Err(out_of_stock());
        }

        let rental = Rental::open(&customer, &game, Utc::now());
        match self.repository.rentals_open(&rental).await {
            Ok(()) => {
                tracing::info!(
                    rental = %rental.id,
                    customer = %customer.id,
                    game = %game.id,
                    "Rental opened"
                );
                Ok(rental)
            }
            Err(StoreError::GuardFailed { .. }) => {
                tracing::info!(game = %game.id, "Last copy taken by a concurrent rental");
                Err(out_of_stock())
            }
            Err(StoreError::Missing { collection: Collection::Games, .. }) => {
                Err(AppError::NotFound("Invalid game.".to_string()))
            }
            Err(e) => {
                tracing::error!(game = %game.id, "Rental transaction failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Close the open rental for a customer and game, charge the fee and restock.
    pub async fn process_return(&self, request: &RentalRequest) -> AppResult<Rental> {
        let mut rental = self
            .repository
            .rentals_find_by_customer_and_game(request.customer_id, request.game_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Rental not found.".to_string()))?;

        if rental.is_returned() {
            return Err(already_returned());
        }

        rental.close(Utc::now());

        let restock = self.repository.games_get_by_id(rental.game.id).await?.is_some();
        if !restock {
            tracing::warn!(
                rental = %rental.id,
                game = %rental.game.id,
                "Game no longer exists; closing rental without restocking"
            );
        }

        let unstocked = match self.repository.rentals_close(&rental, restock).await {
            Ok(()) => false,
            Err(StoreError::GuardFailed { collection: Collection::Rentals, .. }) => {
                return Err(already_returned());
            }
            Err(StoreError::Missing { collection: Collection::Games, .. }) => {
                tracing::warn!(game = %rental.game.id, "Game deleted during return; closing without restocking");
                true
            }
            Err(StoreError::GuardFailed { collection: Collection::Games, .. }) => {
                tracing::warn!(
                    game = %rental.game.id,
                    max = MAX_STOCK,
                    "Stock already at maximum; closing without restocking"
                );
                true
            }
            Err(e) => {
                tracing::error!(rental = %rental.id, "Return transaction failed: {}", e);
                return Err(e.into());
            }
        };

        if unstocked {
            match self.repository.rentals_close(&rental, false).await {
                Ok(()) => {}
                Err(StoreError::GuardFailed { .. }) => return Err(already_returned()),
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            rental = %rental.id,
            fee = rental.rental_fee.unwrap_or_default(),
            "Rental returned"
        );
        Ok(rental)
    }
}
