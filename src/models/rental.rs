//! Rental model and fee computation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{Customer, Game, ObjectId};

/// Customer fields copied into a rental when it is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerSnapshot {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
    pub phone: String,
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// Game fields copied into a rental when it is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub title: String,
    pub daily_rental_rate: i32,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            title: game.title.clone(),
            daily_rental_rate: game.daily_rental_rate,
        }
    }
}

/// Rental document
///
/// `date_returned` and `rental_fee` are either both unset (open) or both
/// set (closed). A closed rental is never modified again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub customer: CustomerSnapshot,
    pub game: GameSnapshot,
    #[serde(with = "super::timestamp")]
    pub date_out: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option")]
    pub date_returned: Option<DateTime<Utc>>,
    pub rental_fee: Option<i64>,
}

impl Rental {
    /// Open a rental for a customer and game at `now`
    pub fn open(customer: &Customer, game: &Game, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            customer: CustomerSnapshot::from(customer),
            game: GameSnapshot::from(game),
            date_out: now,
            date_returned: None,
            rental_fee: None,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.date_returned.is_some()
    }

    /// Close the rental at `now`, charging the snapshotted daily rate
    pub fn close(&mut self, now: DateTime<Utc>) {
        self.rental_fee = Some(rental_fee(self.date_out, now, self.game.daily_rental_rate));
        self.date_returned = Some(now);
    }
}

/// Whole days elapsed between two instants; partial days do not count
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// Fee owed for a rental returned at `returned`
pub fn rental_fee(date_out: DateTime<Utc>, returned: DateTime<Utc>, daily_rate: i32) -> i64 {
    elapsed_days(date_out, returned) * i64::from(daily_rate)
}

/// Create rental / process return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    #[schema(value_type = String)]
    pub customer_id: ObjectId,
    #[schema(value_type = String)]
    pub game_id: ObjectId,
}
