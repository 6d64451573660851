//! Users endpoints

use super::{list_request, require};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse};
use crate::options::RequestOptions;
use crate::types::{JsonObject, JsonValue};

/// `/users` endpoints
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a HttpClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// List or search users (offset pagination)
    pub async fn get_all(
        &self,
        params: Option<&JsonObject>,
        options: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        list_request(self.client.get().add_path("users"), params, options)
            .call()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<HttpResponse> {
        let id = require("id", id)?;
        self.client
            .get()
            .add_paths(["users", id])
            .call()
            .await
    }

    /// Create a user in the given connection
    pub async fn create(&self, connection: &str, body: JsonValue) -> Result<HttpResponse> {
        let connection = require("connection", connection)?;
        let JsonValue::Object(mut body) = body else {
            return Err(Error::invalid_argument("body", "must be a JSON object"));
        };
        body.insert(
            "connection".to_string(),
            JsonValue::String(connection.to_string()),
        );

        self.client
            .post()
            .add_path("users")
            .with_body(JsonValue::Object(body))
            .call()
            .await
    }

    pub async fn update(&self, id: &str, body: JsonValue) -> Result<HttpResponse> {
        let id = require("id", id)?;
        if !body.is_object() {
            return Err(Error::invalid_argument("body", "must be a JSON object"));
        }

        self.client
            .patch()
            .add_paths(["users", id])
            .with_body(body)
            .call()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<HttpResponse> {
        let id = require("id", id)?;
        self.client
            .delete()
            .add_paths(["users", id])
            .call()
            .await
    }

    /// Log events for one user (checkpoint pagination)
    pub async fn get_logs(&self, id: &str, options: Option<&RequestOptions>) -> Result<HttpResponse> {
        let id = require("id", id)?;
        list_request(self.client.get().add_paths(["users", id, "logs"]), None, options)
            .call()
            .await
    }
}
