//! User methods on Repository

use super::{Collection, Filter, Repository, StoreError};
use crate::models::{ObjectId, User};

impl Repository {
    pub async fn users_get_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        self.get(Collection::Users, id).await
    }

    /// Find a user by (lower-cased) email
    pub async fn users_find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.first(Collection::Users, Filter::all().eq("email", email)).await
    }

    pub async fn users_create(&self, user: &User) -> Result<(), StoreError> {
        self.create(Collection::Users, user).await
    }
}
