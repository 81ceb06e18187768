//! MCP server implementation exposing WCAG document retrieval tools and
//! `wcag://` addressed resources.

use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{
        AnnotateAble, CallToolResult, Content, ListResourcesResult, PaginatedRequestParam,
        RawResource, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Serialize;
use serde_json::{json, Value};
use wcag_core::{corpus::FetchError, domain::Slug};

use crate::state::ServerState;

/// MCP server backed by a WCAG documentation corpus.
#[derive(Clone)]
pub struct WcagMcpServer {
    /// Shared corpus state.
    pub(crate) state: ServerState,
    /// Generated router containing all exposed tools.
    pub(crate) tool_router: ToolRouter<Self>,
}

impl WcagMcpServer {
    /// Create a new server with the provided state.
    #[must_use]
    pub fn new(state: ServerState) -> Self {
        Self {
            state,
            tool_router: Self::build_tool_router(),
        }
    }

    pub(crate) fn serialize<T: Serialize>(value: T, context: &str) -> Result<Value, McpError> {
        serde_json::to_value(value).map_err(|error| {
            McpError::internal_error(
                "failed to serialize response",
                Some(json!({ "context": context, "reason": error.to_string() })),
            )
        })
    }

    pub(crate) fn parse_slug(raw: &str) -> Result<Slug, McpError> {
        Slug::new(raw.to_string()).map_err(|error| {
            McpError::invalid_params(
                "invalid document identifier",
                Some(json!({ "id": raw, "reason": error.to_string() })),
            )
        })
    }

    pub(crate) fn fetch_error(error: FetchError) -> McpError {
        match &error {
            FetchError::InvalidRequest(_) => McpError::invalid_params(
                "invalid request",
                Some(json!({ "reason": error.to_string() })),
            ),
            FetchError::UnknownPrefix { prefix, id } => McpError::invalid_params(
                "unknown technique prefix",
                Some(json!({ "prefix": prefix, "id": id })),
            ),
            FetchError::NotFound { kind, id } => McpError::resource_not_found(
                "document not found",
                Some(json!({ "kind": kind.to_string(), "id": id })),
            ),
            FetchError::Store(_) | FetchError::Convert(_) => McpError::internal_error(
                "failed to load document",
                Some(json!({ "reason": error.to_string() })),
            ),
        }
    }

    pub(crate) fn success(summary: impl Into<String>, data: Value) -> CallToolResult {
        CallToolResult {
            content: vec![Content::text(summary.into())],
            structured_content: Some(data),
            is_error: Some(false),
            meta: None,
        }
    }
}

#[tool_handler]
impl ServerHandler for WcagMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            instructions: Some(
                "Use get_guidelines_outline for the full success criteria outline, then \
                 get_success_criterion, get_understanding_document and get_technique to read \
                 individual documents as markdown. list_success_criteria filters the prebuilt \
                 criteria index. Documents are also readable as wcag:// resources."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut outline = RawResource::new("wcag://guidelines", "WCAG guidelines outline");
        outline.description =
            Some("All principles, guidelines and success criteria as a markdown outline".into());
        outline.mime_type = Some("text/markdown".into());
        Ok(ListResourcesResult {
            resources: vec![outline.no_annotation()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let document = self
            .state
            .corpus
            .fetch_uri(&uri)
            .map_err(Self::fetch_error)?;
        let mut contents = ResourceContents::text(document.markdown, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some("text/markdown".to_string());
        }
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
