//! Business logic services

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod games;
pub mod rentals;
pub mod users;

use crate::{
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub games: games::GamesService,
    pub customers: customers::CustomersService,
    pub users: users::UsersService,
    pub rentals: rentals::RentalsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, catalog_config: CatalogConfig) -> Self {
        let auth = auth::AuthService::new(auth_config);
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config),
            games: games::GamesService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth.clone()),
            rentals: rentals::RentalsService::new(repository.clone()),
            auth,
            repository,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.store.ping().await?;
        Ok(())
    }
}
