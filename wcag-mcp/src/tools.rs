//! Tool definitions registered with the MCP router.
//!
//! Each tool is a thin wrapper that delegates to its implementation
//! module; descriptions and annotations live here so the exposed surface
//! is readable in one place.

mod discovery;
mod documents;

use rmcp::{
    handler::server::wrapper::Parameters, model::CallToolResult, tool, tool_router,
    ErrorData as McpError,
};

use crate::server::WcagMcpServer;

#[tool_router]
impl WcagMcpServer {
    #[tool(
        description = "Get the full WCAG guidelines outline: every principle, guideline and \
                       success criterion as a markdown document with wcag:// links",
        annotations(
            title = "Get Guidelines Outline",
            read_only_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn get_guidelines_outline(&self) -> Result<CallToolResult, McpError> {
        documents::get_guidelines_outline(self).await
    }

    #[tool(
        description = "Get a success criterion as markdown by its slug, e.g. 'focus-visible'; \
                       versions are searched in ascending order",
        annotations(
            title = "Get Success Criterion",
            read_only_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn get_success_criterion(
        &self,
        params: Parameters<documents::GetDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        documents::get_success_criterion(self, params).await
    }

    #[tool(
        description = "Get the understanding document for a success criterion as markdown by \
                       its slug",
        annotations(
            title = "Get Understanding Document",
            read_only_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn get_understanding_document(
        &self,
        params: Parameters<documents::GetDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        documents::get_understanding_document(self, params).await
    }

    #[tool(
        description = "Get a technique document as markdown by its identifier, e.g. 'G90' or \
                       'ARIA6'; the prefix selects the technology",
        annotations(
            title = "Get Technique",
            read_only_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn get_technique(
        &self,
        params: Parameters<documents::GetDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        documents::get_technique(self, params).await
    }

    #[tool(
        description = "List success criteria from the prebuilt index, with optional version, \
                       conformance level and substring filters",
        annotations(
            title = "List Success Criteria",
            read_only_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn list_success_criteria(
        &self,
        params: Parameters<discovery::ListCriteriaParams>,
    ) -> Result<CallToolResult, McpError> {
        discovery::list_success_criteria(self, params).await
    }
}

impl WcagMcpServer {
    pub(crate) fn build_tool_router() -> rmcp::handler::server::router::tool::ToolRouter<Self> {
        Self::tool_router()
    }
}
