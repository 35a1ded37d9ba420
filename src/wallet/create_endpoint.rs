//! Defines the endpoint for creating a wallet.

use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    user::UserID,
    validation::{validate_decimal, validate_text},
    wallet::{NewWallet, WalletJson, create_wallet},
};

/// The request body for creating a wallet.
///
/// The owner is always the user making the request.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletForm {
    pub title: String,
    pub currency: String,
    #[serde(default)]
    pub initial_balance: Decimal,
}

impl WalletForm {
    fn into_new_wallet(self, owner_id: UserID) -> Result<NewWallet, Error> {
        Ok(NewWallet {
            title: validate_text("title", &self.title)?,
            currency: validate_text("currency", &self.currency)?,
            initial_balance: validate_decimal("initial_balance", self.initial_balance)?,
            owner_id,
        })
    }
}

/// A route handler for creating a wallet owned by the caller, responds with 201 Created.
pub async fn create_wallet_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Json(form), _): WithRejection<Json<WalletForm>, Error>,
) -> Result<(StatusCode, Json<WalletJson>), Error> {
    let new_wallet = form.into_new_wallet(user_id)?;

    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let wallet = create_wallet(new_wallet, &transaction)?;
    let json = wallet.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} created wallet {}", wallet.id);

    Ok((StatusCode::CREATED, Json(json)))
}
