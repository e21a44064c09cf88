//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod balances;
pub mod bank;
pub mod bank_entry;
pub mod category;
pub mod company;
pub mod damage_stock;
pub mod group;
pub mod health;
pub mod item;
pub mod journal;
pub mod members;
pub mod party;
pub mod payment;
pub mod receipt;
pub mod route;
pub mod tax;
pub mod trade;
pub mod vehicle;
pub mod vehicle_stock;

/// Creates the API router; everything except health and login/logout sits
/// behind the auth middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(members::routes())
        .merge(company::routes())
        .merge(group::routes())
        .merge(route::routes())
        .merge(vehicle::routes())
        .merge(party::routes())
        .merge(bank::routes())
        .merge(category::routes())
        .merge(tax::routes())
        .merge(item::routes())
        .merge(trade::routes())
        .merge(receipt::routes())
        .merge(payment::routes())
        .merge(bank_entry::routes())
        .merge(journal::routes())
        .merge(vehicle_stock::routes())
        .merge(damage_stock::routes())
        .merge(balances::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
