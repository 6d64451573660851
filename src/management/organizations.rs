//! Organizations endpoints

use super::{list_request, require};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse};
use crate::options::RequestOptions;
use serde_json::json;

/// `/organizations` endpoints
#[derive(Debug, Clone, Copy)]
pub struct Organizations<'a> {
    client: &'a HttpClient,
}

impl<'a> Organizations<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self, options: Option<&RequestOptions>) -> Result<HttpResponse> {
        list_request(self.client.get().add_path("organizations"), None, options)
            .call()
            .await
    }

    pub async fn get_members(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        let id = require("id", id)?;
        list_request(
            self.client.get().add_paths(["organizations", id, "members"]),
            None,
            options,
        )
        .call()
        .await
    }

    pub async fn add_members(&self, id: &str, members: &[String]) -> Result<HttpResponse> {
        let id = require("id", id)?;
        if members.is_empty() {
            return Err(Error::invalid_argument("members", "cannot be empty"));
        }

        self.client
            .post()
            .add_paths(["organizations", id, "members"])
            .with_body(json!({ "members": members }))
            .call()
            .await
    }
}
