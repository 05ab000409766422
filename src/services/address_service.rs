use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::address::{Address, CreateAddressRequest, UpdateAddressRequest};

const ADDRESS_COLUMNS: &str =
    "id, user_id, street, city, state, county, pincode, country, is_default, created_at, updated_at";

/// Address book CRUD.
///
/// Invariant: at most one address per user carries `is_default = true`.
/// The unset-others step runs in the same transaction as the insert/update
/// so a crash between the two cannot leave zero or two defaults.
#[derive(Clone)]
pub struct AddressService {
    db: PgPool,
}

impl AddressService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses
             WHERE user_id = $1
             ORDER BY is_default DESC, created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(addresses)
    }

    pub async fn get(&self, address_id: Uuid, user_id: Uuid) -> Result<Address> {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND user_id = $2"
        ))
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Address"))
    }

    pub async fn create(&self, user_id: Uuid, request: CreateAddressRequest) -> Result<Address> {
        let mut tx = self.db.begin().await?;

        if request.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND is_default")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            "INSERT INTO addresses (id, user_id, street, city, state, county, pincode, country, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&request.street)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.county)
        .bind(&request.pincode)
        .bind(&request.country)
        .bind(request.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user_id = %user_id, address_id = %address.id, "Address created");
        Ok(address)
    }

    pub async fn update(
        &self,
        address_id: Uuid,
        user_id: Uuid,
        request: UpdateAddressRequest,
    ) -> Result<Address> {
        // Ownership check before touching anything
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM addresses WHERE id = $1 AND user_id = $2",
        )
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        if exists.is_none() {
            return Err(ApiError::not_found("Address"));
        }

        let mut tx = self.db.begin().await?;

        if request.is_default == Some(true) {
            sqlx::query(
                "UPDATE addresses SET is_default = FALSE
                 WHERE user_id = $1 AND is_default AND id <> $2",
            )
            .bind(user_id)
            .bind(address_id)
            .execute(&mut *tx)
            .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            "UPDATE addresses SET
                street = COALESCE($3, street),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                county = COALESCE($6, county),
                pincode = COALESCE($7, pincode),
                country = COALESCE($8, country),
                is_default = COALESCE($9, is_default),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(address_id)
        .bind(user_id)
        .bind(&request.street)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.county)
        .bind(&request.pincode)
        .bind(&request.country)
        .bind(request.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    pub async fn delete(&self, address_id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(address_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Address"));
        }

        info!(user_id = %user_id, address_id = %address_id, "Address deleted");
        Ok(())
    }
}
