//! # appointy
//!
//! A small JSON service holding two collections, `users` and `posts`, in
//! memory. Each collection supports create, list and get-by-id; records are
//! immutable once stored and vanish when the process exits.
//!
//! ## Layout
//!
//! - [`Storage`] is the capability the handlers need (insert, list, get).
//!   [`MemoryStore`] implements it with one lock around a map and assigns
//!   random UUIDs as ids.
//! - [`Router::resource`] mounts the list/create/get endpoints once,
//!   generically, for any [`Record`](models::Record) type.
//! - [`Server`] accepts connections (HTTP/1.1 and HTTP/2 via hyper), one task
//!   per connection, and drains on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use appointy::{Server, app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), appointy::Error> {
//!     Server::bind("127.0.0.1:8080".parse().unwrap())
//!         .serve(app())
//!         .await
//! }
//! ```
//!
//! ```text
//! $ curl -XPOST localhost:8080/users -d '{"Name":"Ada","Email":"a@x.com","Password":"p"}'
//! {"Id":"6f1c…","Name":"Ada","Email":"a@x.com","Password":"p"}
//! $ curl localhost:8080/users/6f1c…
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod resource;
mod response;
mod router;
mod server;
mod status;
mod storage;

pub mod config;
pub mod health;
pub mod logging;
pub mod models;

pub use app::{app, app_with};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_listener};
pub use status::Status;
pub use storage::{MemoryStore, Storage, StoreError};
