use std::sync::Arc;

use http::Method;
use shared::jsonapi::Document;

use crate::client::Dispatcher;
use crate::error::ClientResult;

/// Users endpoint
#[derive(Debug, Clone)]
pub struct Users {
    dispatcher: Arc<Dispatcher>,
}

impl Users {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get a user by id
    pub async fn show(&self, id: impl std::fmt::Display) -> ClientResult<Document> {
        self.dispatcher
            .run_request(&format!("/users/{}", id), Method::GET, None)
            .await
    }

    /// Get the authenticated user
    pub async fn show_me(&self) -> ClientResult<Document> {
        self.dispatcher.run_request("/me", Method::GET, None).await
    }
}
