//! Roles endpoints

use super::{list_request, require};
use crate::error::Result;
use crate::http::{HttpClient, HttpResponse};
use crate::options::RequestOptions;
use crate::types::JsonObject;

/// `/roles` endpoints
#[derive(Debug, Clone, Copy)]
pub struct Roles<'a> {
    client: &'a HttpClient,
}

impl<'a> Roles<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_all(
        &self,
        params: Option<&JsonObject>,
        options: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        list_request(self.client.get().add_path("roles"), params, options)
            .call()
            .await
    }

    /// Users assigned to a role (checkpoint or offset pagination)
    pub async fn get_users(&self, id: &str, options: Option<&RequestOptions>) -> Result<HttpResponse> {
        let id = require("id", id)?;
        list_request(self.client.get().add_paths(["roles", id, "users"]), None, options)
            .call()
            .await
    }
}
