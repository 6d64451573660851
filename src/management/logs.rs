//! Logs endpoints

use super::{list_request, require};
use crate::error::Result;
use crate::http::{HttpClient, HttpResponse};
use crate::options::RequestOptions;
use crate::types::JsonObject;

/// `/logs` endpoints
#[derive(Debug, Clone, Copy)]
pub struct Logs<'a> {
    client: &'a HttpClient,
}

impl<'a> Logs<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Search log events; accepts either offset or checkpoint options
    pub async fn get_all(
        &self,
        params: Option<&JsonObject>,
        options: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        list_request(self.client.get().add_path("logs"), params, options)
            .call()
            .await
    }

    pub async fn get(&self, id: &str) -> Result<HttpResponse> {
        let id = require("id", id)?;
        self.client.get().add_paths(["logs", id]).call().await
    }
}
