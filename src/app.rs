//! The service's routing table.

use std::sync::Arc;

use crate::health;
use crate::method::Method;
use crate::models::{Post, User};
use crate::router::Router;
use crate::storage::{MemoryStore, Storage};

/// Users and posts over the given backends, plus health probes.
pub fn app_with<U, P>(users: Arc<U>, posts: Arc<P>) -> Router
where
    U: Storage<User> + 'static,
    P: Storage<Post> + 'static,
{
    Router::new()
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness)
        .resource::<User, _>("users", users)
        .resource::<Post, _>("posts", posts)
}

/// Users and posts held in memory for the life of the process.
pub fn app() -> Router {
    app_with(
        Arc::new(MemoryStore::<User>::new()),
        Arc::new(MemoryStore::<Post>::new()),
    )
}
