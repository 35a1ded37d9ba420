//! Defines the endpoint for updating a wallet.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    database_id::WalletId,
    ownership::Owned,
    user::UserID,
    validation::{validate_optional_decimal, validate_text},
    wallet::{Wallet, WalletJson, get_wallet_by_id, update_wallet},
};

/// The fields of a wallet that may be changed. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditWalletForm {
    pub title: Option<String>,
    pub currency: Option<String>,
    pub initial_balance: Option<Decimal>,
}

impl EditWalletForm {
    fn apply(self, wallet: Wallet) -> Result<Wallet, Error> {
        Ok(Wallet {
            title: match self.title {
                Some(title) => validate_text("title", &title)?,
                None => wallet.title,
            },
            currency: match self.currency {
                Some(currency) => validate_text("currency", &currency)?,
                None => wallet.currency,
            },
            initial_balance: validate_optional_decimal("initial_balance", self.initial_balance)?
                .unwrap_or(wallet.initial_balance),
            ..wallet
        })
    }
}

/// A route handler for updating a wallet, only its owner may do this.
pub async fn edit_wallet_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(wallet_id), _): WithRejection<Path<WalletId>, Error>,
    WithRejection(Json(form), _): WithRejection<Json<EditWalletForm>, Error>,
) -> Result<Json<WalletJson>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let wallet = get_wallet_by_id(wallet_id, &transaction)?;
    wallet.authorize(user_id, &transaction, "You can't edit a wallet you don't own!")?;

    let wallet = form.apply(wallet)?;
    update_wallet(&wallet, &transaction)?;
    let json = wallet.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;

    Ok(Json(json))
}
