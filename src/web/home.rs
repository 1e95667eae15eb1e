use axum::extract::State;
use tracing::debug;

use super::AppState;
use crate::db;
use crate::error::Result;
use crate::views::ContactListing;

/// full contact listing, ordered by last name then first name
pub async fn index(State(state): State<AppState>) -> Result<ContactListing> {
    let contacts = state.store.run(|conn| db::get_contacts(conn)).await?;
    debug!("listing {} contacts", contacts.len());

    Ok(ContactListing { contacts })
}
