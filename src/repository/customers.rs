//! Customer methods on Repository

use super::{to_document, Collection, Filter, Repository, SortOrder, StoreError};
use crate::models::{customer::CustomerInput, Customer, ObjectId};

impl Repository {
    /// List customers sorted by name
    pub async fn customers_list(&self) -> Result<Vec<Customer>, StoreError> {
        self.list(Collection::Customers, Filter::all().sort("name", SortOrder::Ascending))
            .await
    }

    pub async fn customers_get_by_id(&self, id: ObjectId) -> Result<Option<Customer>, StoreError> {
        self.get(Collection::Customers, id).await
    }

    pub async fn customers_create(&self, customer: &Customer) -> Result<(), StoreError> {
        self.create(Collection::Customers, customer).await
    }

    /// Replace a customer's profile fields
    pub async fn customers_update(&self, id: ObjectId, data: &CustomerInput) -> Result<Option<Customer>, StoreError> {
        let set = to_document(&serde_json::json!({
            "name": data.name,
            "phone": data.phone,
            "isGold": data.is_gold,
        }))?;
        self.update(Collection::Customers, id, set).await
    }

    pub async fn customers_delete(&self, id: ObjectId) -> Result<Option<Customer>, StoreError> {
        self.remove(Collection::Customers, id).await
    }
}
