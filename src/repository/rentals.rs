//! Rental methods on Repository

use super::{to_document, Collection, Document, Filter, Guard, Repository, SortOrder, StoreError, WriteOp};
use crate::models::{ObjectId, Rental};

const STOCK_FIELD: &str = "numberInStock";

/// Upper bound of a game's stock
pub const MAX_STOCK: i64 = 255;

/// Fields written when a rental is closed, in their stored form
fn closing_fields(rental: &Rental) -> Result<Document, StoreError> {
    let document = to_document(rental)?;
    Ok(["dateReturned", "rentalFee"]
        .into_iter()
        .filter_map(|field| document.get(field).map(|value| (field.to_string(), value.clone())))
        .collect())
}

impl Repository {
    /// List rentals, most recent first
    pub async fn rentals_list(&self) -> Result<Vec<Rental>, StoreError> {
        self.list(Collection::Rentals, Filter::all().sort("dateOut", SortOrder::Descending))
            .await
    }

    pub async fn rentals_get_by_id(&self, id: ObjectId) -> Result<Option<Rental>, StoreError> {
        self.get(Collection::Rentals, id).await
    }

    /// Find the rental currently relevant to a customer and game.
    ///
    /// Prefers the most recent open rental; when none is open, returns the
    /// most recent closed one so callers can report it as already returned.
    pub async fn rentals_find_by_customer_and_game(
        &self,
        customer_id: ObjectId,
        game_id: ObjectId,
    ) -> Result<Option<Rental>, StoreError> {
        let pair = Filter::all()
            .eq("customer._id", customer_id.to_hex())
            .eq("game._id", game_id.to_hex());

        let open = pair
            .clone()
            .is_null("dateReturned")
            .sort("dateOut", SortOrder::Descending);
        if let Some(rental) = self.first(Collection::Rentals, open).await? {
            return Ok(Some(rental));
        }

        self.first(Collection::Rentals, pair.sort("dateOut", SortOrder::Descending))
            .await
    }

    /// Insert the rental and take one copy of the game out of stock, atomically.
    ///
    /// Fails with `GuardFailed` on the game when no copy is left.
    pub async fn rentals_open(&self, rental: &Rental) -> Result<(), StoreError> {
        let ops = vec![
            WriteOp::Insert {
                collection: Collection::Rentals,
                document: to_document(rental)?,
            },
            WriteOp::Increment {
                collection: Collection::Games,
                id: rental.game.id,
                field: STOCK_FIELD.to_string(),
                by: -1,
                guard: Some(Guard::AtLeast(STOCK_FIELD.to_string(), 0)),
            },
        ];
        self.store.atomic_unit(ops).await
    }

    /// Persist a closed rental and put the copy back in stock, atomically.
    ///
    /// Fails with `GuardFailed` on the rental if it was already closed, and
    /// on the game if restocking would push it past `MAX_STOCK`. With
    /// `restock` unset only the rental is written.
    pub async fn rentals_close(&self, rental: &Rental, restock: bool) -> Result<(), StoreError> {
        let mut ops = vec![WriteOp::Update {
            collection: Collection::Rentals,
            id: rental.id,
            set: closing_fields(rental)?,
            guard: Some(Guard::IsNull("dateReturned".to_string())),
        }];
        if restock {
            ops.push(WriteOp::Increment {
                collection: Collection::Games,
                id: rental.game.id,
                field: STOCK_FIELD.to_string(),
                by: 1,
                guard: Some(Guard::AtMost(STOCK_FIELD.to_string(), MAX_STOCK)),
            });
        }
        self.store.atomic_unit(ops).await
    }
}
