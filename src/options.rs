//! Request options for list endpoints
//!
//! Field filtering, offset pagination and checkpoint pagination settings,
//! applied to a builder as query parameters with `with_options`.

use crate::types::ParamValue;

/// Restrict the fields returned for each item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredRequest {
    pub fields: Vec<String>,
    pub include_fields: Option<bool>,
}

impl FilteredRequest {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            include_fields: None,
        }
    }

    /// Whether the listed fields are included (true) or excluded (false)
    #[must_use]
    pub fn include_fields(mut self, include: bool) -> Self {
        self.include_fields = Some(include);
        self
    }
}

/// Offset pagination: zero-based page number and page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginatedRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub include_totals: Option<bool>,
}

impl PaginatedRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            include_totals: Some(true),
        }
    }

    #[must_use]
    pub fn include_totals(mut self, include: bool) -> Self {
        self.include_totals = Some(include);
        self
    }
}

/// Checkpoint pagination: opaque cursor and page size
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointPaginatedRequest {
    pub from: Option<String>,
    pub take: Option<u32>,
}

impl CheckpointPaginatedRequest {
    pub fn new(take: u32) -> Self {
        Self {
            from: None,
            take: Some(take),
        }
    }

    #[must_use]
    pub fn starting_from(mut self, checkpoint: impl Into<String>) -> Self {
        self.from = Some(checkpoint.into());
        self
    }
}

/// Options accepted by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub fields: Option<FilteredRequest>,
    pub pagination: Option<PaginatedRequest>,
    pub checkpoint: Option<CheckpointPaginatedRequest>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fields(mut self, fields: FilteredRequest) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginatedRequest) -> Self {
        self.pagination = Some(pagination);
        self
    }

    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: CheckpointPaginatedRequest) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Query parameters these options translate to, in a stable order
    pub fn to_params(&self) -> Vec<(String, ParamValue)> {
        let mut params = Vec::new();

        if let Some(filter) = &self.fields {
            if !filter.fields.is_empty() {
                params.push(("fields".to_string(), filter.fields.join(",").into()));
                params.push((
                    "include_fields".to_string(),
                    filter.include_fields.into(),
                ));
            }
        }

        if let Some(page) = &self.pagination {
            params.push(("page".to_string(), page.page.into()));
            params.push(("per_page".to_string(), page.per_page.into()));
            params.push(("include_totals".to_string(), page.include_totals.into()));
        }

        if let Some(checkpoint) = &self.checkpoint {
            params.push(("from".to_string(), checkpoint.from.clone().into()));
            params.push(("take".to_string(), checkpoint.take.into()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(options: &RequestOptions) -> Vec<(String, String)> {
        options
            .to_params()
            .into_iter()
            .filter_map(|(k, v)| v.render().map(|v| (k, v)))
            .collect()
    }

    #[test]
    fn test_empty_options() {
        assert!(RequestOptions::new().to_params().is_empty());
    }

    #[test]
    fn test_field_filter() {
        let options = RequestOptions::new()
            .with_fields(FilteredRequest::new(["user_id", "email"]).include_fields(true));

        assert_eq!(
            rendered(&options),
            vec![
                ("fields".to_string(), "user_id,email".to_string()),
                ("include_fields".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_filter_without_fields_is_ignored() {
        let options = RequestOptions::new().with_fields(FilteredRequest::default());
        assert!(options.to_params().is_empty());
    }

    #[test]
    fn test_offset_pagination_keeps_page_zero() {
        let options = RequestOptions::new().with_pagination(PaginatedRequest::new(0, 50));

        assert_eq!(
            rendered(&options),
            vec![
                ("page".to_string(), "0".to_string()),
                ("per_page".to_string(), "50".to_string()),
                ("include_totals".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_checkpoint_pagination() {
        let first = RequestOptions::new().with_checkpoint(CheckpointPaginatedRequest::new(25));
        assert_eq!(
            rendered(&first),
            vec![("take".to_string(), "25".to_string())]
        );

        let next = RequestOptions::new()
            .with_checkpoint(CheckpointPaginatedRequest::new(25).starting_from("cursor_1"));
        assert_eq!(
            rendered(&next),
            vec![
                ("from".to_string(), "cursor_1".to_string()),
                ("take".to_string(), "25".to_string()),
            ]
        );
    }
}
