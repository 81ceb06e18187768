use rmcp::{handler::server::wrapper::Parameters, model::CallToolResult, ErrorData as McpError};
use serde::{Deserialize, Serialize};
use wcag_core::{corpus::FetchedDocument, domain::ResourceAddress};

use crate::server::WcagMcpServer;

#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentParams {
    /// Document identifier: a criterion or understanding slug such as
    /// "focus-visible", or a technique identifier such as "G90".
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Canonical wcag:// address of the document.
    pub address: String,
    /// Document kind, e.g. "success criterion".
    pub kind: String,
    /// The identifier as requested; absent for the outline.
    #[serde(default)]
    pub id: Option<String>,
    /// Version the document resolved to, e.g. "21".
    #[serde(default)]
    pub version: Option<String>,
    /// Technology directory a technique resolved to, e.g. "general".
    #[serde(default)]
    pub technology: Option<String>,
}

pub(super) async fn get_guidelines_outline(
    server: &WcagMcpServer,
) -> Result<CallToolResult, McpError> {
    let document = server
        .state
        .corpus
        .fetch_outline()
        .map_err(WcagMcpServer::fetch_error)?;
    respond(&document, ResourceAddress::Outline.to_string())
}

pub(super) async fn get_success_criterion(
    server: &WcagMcpServer,
    params: Parameters<GetDocumentParams>,
) -> Result<CallToolResult, McpError> {
    let slug = WcagMcpServer::parse_slug(&params.0.id)?;
    let document = server
        .state
        .corpus
        .fetch_criterion(&slug)
        .map_err(WcagMcpServer::fetch_error)?;
    respond(&document, ResourceAddress::Criterion(slug).to_string())
}

pub(super) async fn get_understanding_document(
    server: &WcagMcpServer,
    params: Parameters<GetDocumentParams>,
) -> Result<CallToolResult, McpError> {
    let slug = WcagMcpServer::parse_slug(&params.0.id)?;
    let document = server
        .state
        .corpus
        .fetch_understanding(&slug)
        .map_err(WcagMcpServer::fetch_error)?;
    respond(&document, ResourceAddress::Understanding(slug).to_string())
}

pub(super) async fn get_technique(
    server: &WcagMcpServer,
    params: Parameters<GetDocumentParams>,
) -> Result<CallToolResult, McpError> {
    let document = server
        .state
        .corpus
        .fetch_technique(&params.0.id)
        .map_err(WcagMcpServer::fetch_error)?;
    respond(
        &document,
        ResourceAddress::Technique(params.0.id).to_string(),
    )
}

/// Wraps a fetched document: the markdown is the text content and the
/// metadata rides along as structured content.
fn respond(document: &FetchedDocument, address: String) -> Result<CallToolResult, McpError> {
    let info = DocumentInfo {
        address,
        kind: document.kind.to_string(),
        id: document.id.clone(),
        version: document.version.map(|version| version.to_string()),
        technology: document.technology.map(|technology| technology.to_string()),
    };
    Ok(WcagMcpServer::success(
        document.markdown.clone(),
        WcagMcpServer::serialize(info, "document metadata")?,
    ))
}
