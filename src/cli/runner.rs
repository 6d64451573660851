//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::response::{content, decode_content, status_code};
use crate::http::HttpClient;
use crate::pagination::ResponsePaginator;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get {
                path,
                params,
                paginate,
                max_items,
            } => self.get(path, params, *paginate, *max_items).await,
        }
    }

    /// Resolve the client config from file and flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.domain) {
            (Some(path), _) => ClientConfig::from_file(path)?,
            (None, Some(domain)) => ClientConfig::new(domain.clone()),
            (None, None) => {
                return Err(Error::config(
                    "No domain configured (use --config or --domain)",
                ))
            }
        };

        if let (Some(_), Some(domain)) = (&self.cli.config, &self.cli.domain) {
            config.domain = domain.clone();
        }
        if let Some(token) = &self.cli.token {
            config
                .default_headers
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        config.validate()?;
        Ok(config)
    }

    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
        paginate: bool,
        max_items: Option<usize>,
    ) -> Result<()> {
        let client = HttpClient::new(&self.client_config()?)?;
        debug!("GET {} with {} params", path, params.len());
        let response = client
            .get()
            .add_path(path)
            .with_params(params.iter().map(|(k, v)| (k.clone(), v.clone())))
            .call()
            .await?;

        let status = status_code(&response);
        if !(200..300).contains(&status) {
            return Err(Error::Other(format!(
                "HTTP {status}: {}",
                content(&response)
            )));
        }

        let mut stdout = std::io::stdout().lock();

        if !paginate {
            match decode_content(&response) {
                Ok(body) => writeln!(stdout, "{}", serde_json::to_string_pretty(&body)?)?,
                Err(_) => writeln!(stdout, "{}", content(&response))?,
            }
            return Ok(());
        }

        let mut paginator = ResponsePaginator::new(&client)?;
        let limit = max_items.unwrap_or(usize::MAX);
        let mut printed = 0;

        while printed < limit {
            let Some(item) = paginator.next_item().await else {
                break;
            };
            writeln!(stdout, "{item}")?;
            printed += 1;
        }

        info!(
            "Printed {} items using {} additional requests",
            printed,
            paginator.count_network_requests()
        );
        Ok(())
    }
}
