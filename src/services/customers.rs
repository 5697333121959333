//! Customer service

use crate::{
    error::{AppError, AppResult},
    models::{customer::CustomerInput, Customer, ObjectId},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

fn missing_customer() -> AppError {
    AppError::NotFound("Customer with the given id does not exist.".to_string())
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(self.repository.customers_list().await?)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Customer> {
        self.repository.customers_get_by_id(id).await?.ok_or_else(missing_customer)
    }

    pub async fn create(&self, data: &CustomerInput) -> AppResult<Customer> {
        let customer = Customer {
            id: ObjectId::new(),
            name: data.name.clone(),
            phone: data.phone.clone(),
            is_gold: data.is_gold,
        };
        self.repository.customers_create(&customer).await?;
        tracing::info!(id = %customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: ObjectId, data: &CustomerInput) -> AppResult<Customer> {
        self.repository
            .customers_update(id, data)
            .await?
            .ok_or_else(missing_customer)
    }

    pub async fn delete(&self, id: ObjectId) -> AppResult<Customer> {
        self.repository.customers_delete(id).await?.ok_or_else(missing_customer)
    }
}
