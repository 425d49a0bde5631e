//! Generic collection endpoints.
//!
//! [`Router::resource`] mounts one record kind under `/<name>`:
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/<name>` | `200`, JSON array of every record |
//! | POST | `/<name>` | `201`, the created record with its generated `Id` |
//! | any | `/<name>/<id>` | `200` JSON object, or `404` |
//! | other | `/<name>` | `405` |
//!
//! The item path must be exactly `/<name>/<id>`: no trailing segments, no
//! query string. Anything else is `404`, never a lookup of a mangled id.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::method::Method;
use crate::models::Record;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response, internal_error};
use crate::router::Router;
use crate::status::Status;
use crate::storage::{Storage, StoreError};

impl Router {
    /// Mount list/create/get endpoints for records of type `T` under `/<name>`.
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use appointy::{MemoryStore, Router, models::User};
    ///
    /// let app = Router::new().resource::<User, _>("users", Arc::new(MemoryStore::new()));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains `/`.
    pub fn resource<T, S>(self, name: &str, storage: Arc<S>) -> Self
    where
        T: Record,
        S: Storage<T> + 'static,
    {
        assert!(
            !name.is_empty() && !name.contains('/'),
            "invalid collection name `{name}`"
        );
        let base: Arc<str> = Arc::from(format!("/{name}"));

        let list_store = Arc::clone(&storage);
        let create_store = Arc::clone(&storage);
        let create_base = Arc::clone(&base);

        self.on(Method::Get, &base, move |req: Request| {
            list::<T, S>(Arc::clone(&list_store), req)
        })
        .on(Method::Post, &base, move |req: Request| {
            create::<T, S>(Arc::clone(&create_store), Arc::clone(&create_base), req)
        })
        .any(&format!("{base}/{{*rest}}"), move |req: Request| {
            fetch::<T, S>(Arc::clone(&storage), req)
        })
    }
}

async fn list<T: Record, S: Storage<T>>(storage: Arc<S>, _req: Request) -> Response {
    match storage.list().await {
        Ok(records) => Json(records).into_response(),
        Err(e) => storage_failure(e),
    }
}

async fn create<T: Record, S: Storage<T>>(
    storage: Arc<S>,
    base: Arc<str>,
    req: Request,
) -> Response {
    // Decode into a fresh value first: a bad body never reaches the store.
    let record: T = match req.json() {
        Ok(record) => record,
        Err(e) => {
            debug!(collection = %base, error = %e, "rejected malformed body");
            return Response::builder().status(Status::BadRequest).text(e.to_string());
        }
    };

    let created = match storage.insert(record).await {
        Ok(created) => created,
        Err(e) => return storage_failure(e),
    };
    info!(collection = %base, id = created.id(), "record created");

    match serde_json::to_vec(&created) {
        Ok(body) => Response::builder()
            .status(Status::Created)
            .header("location", &format!("{base}/{}", created.id()))
            .json(body),
        Err(e) => internal_error(e),
    }
}

async fn fetch<T: Record, S: Storage<T>>(storage: Arc<S>, req: Request) -> Response {
    let Some(id) = item_id(&req) else {
        debug!(path = req.path(), "malformed item path");
        return Response::status(Status::NotFound);
    };

    match storage.get(id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => Response::status(Status::NotFound),
        Err(e) => storage_failure(e),
    }
}

/// The `<id>` of `/<name>/<id>`, if the target has exactly that shape.
fn item_id(req: &Request) -> Option<&str> {
    if req.query().is_some() {
        return None;
    }
    req.param("rest").filter(|rest| !rest.contains('/'))
}

fn storage_failure(err: StoreError) -> Response {
    error!(error = %err, "storage operation failed");
    internal_error(err)
}
