//! create, read, edit and delete of single contacts

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::{parse_id, redirect_found, AppState};
use crate::db;
use crate::error::{Error, Result};
use crate::validate::{self, ContactPayload, FieldError};
use crate::views::{ContactDetailsView, ContactFormView, DeleteConfirmView};

fn details_url(id: i64) -> String {
    format!("/Contacts/Details/{}", id)
}

fn log_rejection(action: &str, errors: &[FieldError]) {
    warn!("{} rejected, {} invalid field(s)", action, errors.len());
    for e in errors {
        warn!("  - {}: {}", e.field, e.message);
    }
}

/// GET /Contacts/Details/{id}
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ContactDetailsView> {
    let id = parse_id(&id)?;
    debug!("details for contact {}", id);

    let detail = state
        .store
        .run(move |conn| db::find_contact_detail(conn, id))
        .await?
        .ok_or(Error::NotFound)?;

    Ok(ContactDetailsView { detail })
}

/// GET /Contacts/Create
pub async fn create_form(State(state): State<AppState>) -> Result<ContactFormView> {
    let categories = state.store.run(|conn| db::get_categories(conn)).await?;

    Ok(ContactFormView {
        is_edit: false,
        contact: ContactPayload::blank(),
        errors: Vec::new(),
        categories,
    })
}

/// POST /Contacts/Create
pub async fn create(
    State(state): State<AppState>,
    Form(payload): Form<ContactPayload>,
) -> Result<Response> {
    let categories = state.store.run(|conn| db::get_categories(conn)).await?;

    let fields = match validate::validate(&payload, &categories) {
        Ok(fields) => fields,
        Err(errors) => {
            log_rejection("create", &errors);
            return Ok(ContactFormView {
                is_edit: false,
                contact: payload,
                errors,
                categories,
            }
            .into_response());
        }
    };

    let date_created = Utc::now();
    let insert = fields.clone();
    let id = state
        .store
        .run(move |conn| db::insert_contact(conn, &insert, date_created))
        .await?;

    info!(
        "added contact {}: {} {}, phone {}, category {}, created {}",
        id, fields.first_name, fields.last_name, fields.phone_number,
        fields.category_id, date_created
    );

    Ok(redirect_found(&details_url(id)))
}

/// GET /Contacts/Edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ContactFormView> {
    let id = parse_id(&id)?;

    let (contact, categories) = state
        .store
        .run(move |conn| {
            let contact = db::find_contact(conn, id)?.ok_or(Error::NotFound)?;
            Ok((contact, db::get_categories(conn)?))
        })
        .await?;

    Ok(ContactFormView {
        is_edit: true,
        contact: ContactPayload::from(&contact),
        errors: Vec::new(),
        categories,
    })
}

/// POST /Contacts/Edit/{id}
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<ContactPayload>,
) -> Result<Response> {
    let id = parse_id(&id)?;
    if payload.id() != Some(id) {
        debug!("edit of contact {} w/ mismatched payload id {:?}", id, payload.contact_id);
        return Err(Error::NotFound);
    }

    let categories = state.store.run(|conn| db::get_categories(conn)).await?;

    let fields = match validate::validate(&payload, &categories) {
        Ok(fields) => fields,
        Err(errors) => {
            log_rejection("edit", &errors);
            return Ok(ContactFormView {
                is_edit: true,
                contact: payload,
                errors,
                categories,
            }
            .into_response());
        }
    };

    let updated = state
        .store
        .run(move |conn| db::update_contact(conn, id, &fields))
        .await?;

    if !updated {
        return Err(Error::NotFound);
    }

    info!("updated contact {}", id);
    Ok(redirect_found(&details_url(id)))
}

/// GET /Contacts/Delete/{id}; confirmation step
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<DeleteConfirmView> {
    let id = parse_id(&id)?;

    let detail = state
        .store
        .run(move |conn| db::find_contact_detail(conn, id))
        .await?
        .ok_or(Error::NotFound)?;

    Ok(DeleteConfirmView { detail })
}

/// POST /Contacts/Delete/{id}; always ends up back at the listing,
/// whether something was removed or not
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    if let Ok(id) = parse_id(&id) {
        let removed = state
            .store
            .run(move |conn| db::delete_contact(conn, id))
            .await?;

        if removed {
            info!("deleted contact {}", id);
        } else {
            debug!("delete of missing contact {}, nothing to do", id);
        }
    }

    Ok(redirect_found("/"))
}
