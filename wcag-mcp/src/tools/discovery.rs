use rmcp::{handler::server::wrapper::Parameters, model::CallToolResult, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wcag_core::{
    domain::WcagVersion,
    index::{ConformanceLevel, CriterionRecord},
};

use crate::server::WcagMcpServer;

#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCriteriaParams {
    /// Optional version filter: "20", "21" or "22".
    #[serde(default)]
    pub version: Option<String>,
    /// Optional conformance level filter: "A", "AA" or "AAA".
    #[serde(default)]
    pub level: Option<String>,
    /// Optional case-insensitive substring search on title and content.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriterionSummary {
    /// Criterion slug.
    pub id: String,
    /// Version the criterion was indexed from.
    pub version: String,
    /// Conformance level, when the fragment declares one.
    #[serde(default)]
    pub conformance_level: Option<String>,
    /// Criterion title; empty when the fragment has no heading.
    pub title: String,
    /// Canonical wcag:// address.
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCriteriaResponse {
    /// Normalized version filter that was applied.
    #[serde(default)]
    pub version: Option<String>,
    /// Normalized level filter that was applied.
    #[serde(default)]
    pub level: Option<String>,
    /// Query string that was applied.
    #[serde(default)]
    pub query: Option<String>,
    /// Matching criteria, sorted by version then slug.
    pub results: Vec<CriterionSummary>,
}

pub(super) async fn list_success_criteria(
    server: &WcagMcpServer,
    params: Parameters<ListCriteriaParams>,
) -> Result<CallToolResult, McpError> {
    let params = params.0;
    let Some(index) = server.state.corpus.index() else {
        return Err(McpError::internal_error(
            "criteria index is not loaded; build one with wcag-index and restart",
            None,
        ));
    };

    let version = params
        .version
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<WcagVersion>().map_err(|error| {
                McpError::invalid_params(
                    "invalid version filter",
                    Some(json!({ "version": raw, "reason": error.to_string() })),
                )
            })
        })
        .transpose()?;
    let level = params
        .level
        .as_deref()
        .map(|raw| raw.trim().to_uppercase())
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<ConformanceLevel>().map_err(|error| {
                McpError::invalid_params(
                    "invalid conformance level filter",
                    Some(json!({ "level": raw, "reason": error.to_string() })),
                )
            })
        })
        .transpose()?;
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_lowercase);

    let results: Vec<CriterionSummary> = index
        .records()
        .iter()
        .filter(|record| version.is_none_or(|version| record.version == version))
        .filter(|record| level.is_none_or(|level| record.conformance_level == Some(level)))
        .filter(|record| {
            query.as_ref().is_none_or(|query| {
                record.title.to_lowercase().contains(query)
                    || record.raw_content.to_lowercase().contains(query)
            })
        })
        .map(summarize)
        .collect();

    let response = ListCriteriaResponse {
        version: version.map(|version| version.to_string()),
        level: level.map(|level| level.to_string()),
        query,
        results,
    };

    let summary = format!("Found {} success criteria", response.results.len());
    Ok(WcagMcpServer::success(
        summary,
        WcagMcpServer::serialize(response, "list_success_criteria response")?,
    ))
}

fn summarize(record: &CriterionRecord) -> CriterionSummary {
    CriterionSummary {
        id: record.id.to_string(),
        version: record.version.to_string(),
        conformance_level: record.conformance_level.map(|level| level.to_string()),
        title: record.title.clone(),
        address: format!("wcag://criterion/{}", record.id),
    }
}
