use std::sync::Arc;

use http::Method;
use shared::jsonapi::Document;

use crate::client::Dispatcher;
use crate::error::ClientResult;

/// Statistics endpoint
#[derive(Debug, Clone)]
pub struct Stats {
    dispatcher: Arc<Dispatcher>,
}

impl Stats {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get a statistics set (`account`, `forum`, `groups`)
    pub async fn show(&self, id: &str) -> ClientResult<Document> {
        self.dispatcher
            .run_request(&format!("/stats/{}", id), Method::GET, None)
            .await
    }
}
