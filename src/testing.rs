//! In-memory [`Requester`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HttpError;
use crate::http::Requester;

/// Serves canned responses per route and records every route requested.
/// Unknown routes answer 404.
#[derive(Debug, Default)]
pub(crate) struct MockRequester {
    responses: HashMap<String, Result<Value, HttpError>>,
    requested: Mutex<Vec<String>>,
}

impl MockRequester {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_json(mut self, route: &str, body: Value) -> Self {
        self.responses.insert(route.to_string(), Ok(body));
        self
    }

    pub(crate) fn with_status(self, route: &str, status: u16) -> Self {
        let err = HttpError::Api {
            status,
            body: String::new(),
            route: route.to_string(),
        };
        self.with_error(route, err)
    }

    pub(crate) fn with_error(mut self, route: &str, err: HttpError) -> Self {
        self.responses.insert(route.to_string(), Err(err));
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Requester for MockRequester {
    async fn get_json(&self, route: &str) -> Result<Value, HttpError> {
        if let Ok(mut routes) = self.requested.lock() {
            routes.push(route.to_string());
        }

        self.responses
            .get(route)
            .cloned()
            .unwrap_or_else(|| {
                Err(HttpError::Api {
                    status: 404,
                    body: "404: Not Found".to_string(),
                    route: route.to_string(),
                })
            })
    }
}
