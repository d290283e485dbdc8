use std::sync::Arc;

use http::Method;
use shared::jsonapi::Document;
use shared::request::{AuthTokenAttributes, RequestDocument};

use crate::client::Dispatcher;
use crate::error::{ClientError, ClientResult};

/// Auth endpoint
#[derive(Debug, Clone)]
pub struct Auth {
    dispatcher: Arc<Dispatcher>,
}

impl Auth {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Exchange the stored user credentials at `/auth/token`.
    ///
    /// The response document is returned as-is.
    pub async fn request_token(&self) -> ClientResult<Document> {
        let credentials = self.dispatcher.credentials();
        let body = RequestDocument::from(AuthTokenAttributes {
            username: credentials.username().to_string(),
            token_secret: credentials.secret().to_string(),
        })
        .into_value()?;

        self.dispatcher
            .run_request("/auth/token", Method::POST, Some(body))
            .await
    }

    /// Request a bearer token and use it for every following request.
    pub async fn get_bearer_token(&self) -> ClientResult<String> {
        let document = self.request_token().await?;
        let token = document
            .get_str("meta.token")
            .ok_or_else(|| ClientError::InvalidResponse("Missing meta.token".into()))?
            .to_string();

        self.dispatcher.set_access_token(Some(token.clone()));
        tracing::debug!("Bearer token stored");
        Ok(token)
    }
}
