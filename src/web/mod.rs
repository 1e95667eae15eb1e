//! http surface; routes map onto the contact and home handlers

pub mod contacts;
pub mod home;

use axum::extract::Request;
use axum::http::uri::PathAndQuery;
use axum::http::{header, StatusCode, Uri};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tracing::{debug, error};

use crate::db::Store;
use crate::error::Error;
use crate::views::{ErrorView, NotFoundView};

/// state shared by every handler; only knows where the db lives,
/// connections are opened per request
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
}

/// actions that take an id; `?id=` fills in for a missing path segment
const ID_ACTIONS: [&str; 3] = ["/contacts/details", "/contacts/edit", "/contacts/delete"];

pub fn router(store: Store) -> Router {
    // routes are matched against the normalized (lowercase) path
    let routes = Router::new()
        .route("/", get(home::index))
        .route("/home", get(home::index))
        .route("/home/index", get(home::index))
        .route("/contacts/details/:id", get(contacts::details))
        .route(
            "/contacts/create",
            get(contacts::create_form).post(contacts::create),
        )
        .route(
            "/contacts/edit/:id",
            get(contacts::edit_form).post(contacts::edit),
        )
        .route(
            "/contacts/delete/:id",
            get(contacts::delete_confirm).post(contacts::delete),
        )
        .fallback(not_found)
        .with_state(AppState { store });

    // the path has to be rewritten before routing happens,
    // hence wrapping the routes instead of Router::layer
    Router::new().fallback_service(middleware::map_request(normalize_request).layer(routes))
}

async fn normalize_request(mut request: Request) -> Request {
    let uri = request.uri();
    let normalized = normalize_path(uri.path(), uri.query());

    if let Ok(path_and_query) = normalized.parse::<PathAndQuery>() {
        let mut parts = uri.clone().into_parts();
        parts.path_and_query = Some(path_and_query);

        if let Ok(rewritten) = Uri::from_parts(parts) {
            debug!("{} {} -> {}", request.method(), request.uri(), rewritten);
            *request.uri_mut() = rewritten;
        }
    }

    request
}

/// case-insensitive paths, optional trailing slash, and the id of
/// `/contacts/{action}` taken from the query string if the path has none;
/// returns the path w/ the query (if any) appended
pub fn normalize_path(path: &str, query: Option<&str>) -> String {
    let mut path = path.to_ascii_lowercase();
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    if ID_ACTIONS.contains(&path.as_str()) {
        if let Some(id) = query.and_then(query_id) {
            path.push('/');
            path.push_str(id);
        }
    }

    match query {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    }
}

fn query_id(query: &str) -> Option<&str> {
    query
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            key.eq_ignore_ascii_case("id").then_some(value)
        })
        .filter(|id| !id.is_empty())
}

async fn not_found() -> NotFoundView {
    NotFoundView
}

/// parse an identifier from the path; anything but an integer is not found
pub fn parse_id(raw: &str) -> Result<i64, Error> {
    raw.trim().parse().map_err(|_| Error::NotFound)
}

pub fn redirect_found(url: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundView.into_response(),
            other => {
                error!("request failed: {}", other);
                ErrorView.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn parse_id_works()
    {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 3 ").unwrap(), 3);
        assert!(matches!(parse_id("abc"), Err(Error::NotFound)));
        assert!(matches!(parse_id(""), Err(Error::NotFound)));
    }

    #[test]
    fn normalize_path_works()
    {
        assert_eq!(normalize_path("/", None), "/");
        assert_eq!(normalize_path("/Home/Index/", None), "/home/index");
        assert_eq!(normalize_path("/CONTACTS/Details/5//", None), "/contacts/details/5");
        assert_eq!(
            normalize_path("/Contacts/Details", Some("id=1")),
            "/contacts/details/1?id=1"
        );
        assert_eq!(
            normalize_path("/contacts/delete/", Some("x=2&Id=7")),
            "/contacts/delete/7?x=2&Id=7"
        );
        // a path id wins, blank ids and other actions are left alone
        assert_eq!(
            normalize_path("/contacts/edit/3", Some("id=4")),
            "/contacts/edit/3?id=4"
        );
        assert_eq!(normalize_path("/contacts/edit", Some("id=")), "/contacts/edit?id=");
        assert_eq!(normalize_path("/contacts/create", Some("id=1")), "/contacts/create?id=1");
    }

    #[test]
    fn storage_errors_become_generic_500()
    {
        let response = Error::Integrity("Contacts".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
