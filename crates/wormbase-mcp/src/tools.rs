//! MCP tool definitions for WormBase lookups.
//!
//! Every tool validates its parameters, delegates to
//! [`wormbase_client::WormBaseClient`], and serializes the result as
//! pretty-printed JSON text. Client failures are converted into protocol
//! errors here; nothing escapes to the transport un-wrapped.

use crate::catalog::{entity_types_document, ENTITY_TYPES_URI};
use rmcp::{
    handler::server::router::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars, service::RequestContext, tool, tool_handler, tool_router, RoleServer, ServerHandler,
};
use serde::Deserialize;
use std::borrow::Cow;
use wormbase_client::{is_entity_type, WormBaseClient};

type McpError = rmcp::model::ErrorData;

const INTERACTION_KINDS: [&str; 4] = ["genetic", "physical", "regulatory", "all"];

/// MCP tool router for WormBase operations.
#[derive(Clone)]
pub struct WormBaseTools {
    tool_router: ToolRouter<WormBaseTools>,
    client: WormBaseClient,
}

impl std::fmt::Debug for WormBaseTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WormBaseTools").finish()
    }
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(message),
        data: None,
    }
}

fn invalid_params(message: String) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> CallToolResult {
    let json = serde_json::to_string_pretty(value).unwrap_or_default();
    CallToolResult::success(vec![Content::text(json)])
}

fn check_entity_type(entity_type: &str) -> Result<(), McpError> {
    if is_entity_type(entity_type) {
        Ok(())
    } else {
        Err(invalid_params(format!(
            "Unknown entity type '{entity_type}'"
        )))
    }
}

// === Tool parameter types (JSON Schema via schemars) ===

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    /// Search query - a gene name (e.g. 'daf-2'), a WormBase ID
    /// (e.g. 'WBGene00006763'), or a natural language description.
    pub query: String,
    /// Entity type to search for. Searches all types when omitted.
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    /// Maximum number of results to return (default: 10).
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EntityParams {
    /// Entity type from the wormbase://entity-types catalogue.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Entity identifier.
    pub id: String,
    /// Specific widgets to fetch; each type has its own defaults.
    pub widgets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WidgetParams {
    /// Entity identifier - WormBase ID or display name.
    pub id: String,
    /// Specific widgets to fetch; defaults depend on the entity type.
    pub widgets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InteractionsParams {
    /// Gene or protein identifier.
    pub id: String,
    /// Kind of interactions to retrieve: genetic, physical, regulatory,
    /// or all (default).
    pub interaction_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IdParams {
    /// Gene identifier.
    pub id: String,
}

#[tool_router]
impl WormBaseTools {
    pub fn new(client: WormBaseClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    /// Shared widget-fanout path behind every per-type entity tool.
    async fn fetch_entity(
        &self,
        entity_type: &str,
        id: &str,
        widgets: Option<Vec<String>>,
    ) -> Result<CallToolResult, McpError> {
        let record = self
            .client
            .get_entity(entity_type, id, widgets.as_deref())
            .await;
        Ok(json_result(&record))
    }

    #[tool(
        name = "search",
        description = "Search WormBase for genes, proteins, phenotypes, strains, and other biological entities. Supports natural language queries like 'genes involved in longevity' or specific IDs like 'WBGene00006763'."
    )]
    async fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        if let Some(ref ty) = params.entity_type {
            check_entity_type(ty)?;
        }

        let resp = self
            .client
            .search(&params.query, params.entity_type.as_deref(), params.limit)
            .await
            .map_err(|e| internal_error(format!("Error searching WormBase: {e}")))?;

        Ok(json_result(&resp))
    }

    #[tool(
        name = "get_gene",
        description = "Get detailed information about a C. elegans gene including description, function, expression, phenotypes, and orthologs."
    )]
    async fn get_gene(&self, params: Parameters<WidgetParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("gene", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_protein",
        description = "Get detailed information about a protein including sequence, domains, motifs, and structure."
    )]
    async fn get_protein(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("protein", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_phenotype",
        description = "Get detailed information about a phenotype including associated genes, RNAi experiments, and variations."
    )]
    async fn get_phenotype(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("phenotype", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_disease",
        description = "Get information about human diseases with C. elegans models, including associated genes and orthologs."
    )]
    async fn get_disease(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("disease", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_strain",
        description = "Get information about a C. elegans strain including genotype, available from, and associated phenotypes."
    )]
    async fn get_strain(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("strain", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_variation",
        description = "Get information about a genetic variation/allele including molecular details, phenotypes, and strains."
    )]
    async fn get_variation(
        &self,
        params: Parameters<WidgetParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.fetch_entity("variation", &params.id, params.widgets).await
    }

    #[tool(
        name = "get_interactions",
        description = "Get protein-protein, genetic, or regulatory interactions for a gene or protein."
    )]
    async fn get_interactions(
        &self,
        params: Parameters<InteractionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let kind = params.interaction_type.as_deref().unwrap_or("all");
        if !INTERACTION_KINDS.contains(&kind) {
            return Err(invalid_params(format!(
                "Unknown interaction type '{kind}'. Use: genetic, physical, regulatory, all"
            )));
        }

        let data = self
            .client
            .get_interactions(&params.id, kind)
            .await
            .map_err(|e| internal_error(format!("Error fetching interactions: {e}")))?;

        Ok(json_result(&data))
    }

    #[tool(
        name = "get_expression",
        description = "Get expression pattern information for a gene including tissue/cell expression, life stage expression, and expression images."
    )]
    async fn get_expression(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        let data = self
            .client
            .get_expression(&params.0.id)
            .await
            .map_err(|e| internal_error(format!("Error fetching expression: {e}")))?;

        Ok(json_result(&data))
    }

    #[tool(
        name = "get_ontology",
        description = "Get Gene Ontology (GO) terms for a gene including molecular function, biological process, and cellular component annotations."
    )]
    async fn get_ontology(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        let data = self
            .client
            .get_ontology(&params.0.id)
            .await
            .map_err(|e| internal_error(format!("Error fetching ontology: {e}")))?;

        Ok(json_result(&data))
    }

    #[tool(
        name = "get_entity",
        description = "Get information about any WormBase entity type. Use this for entity types not covered by specific tools."
    )]
    async fn get_entity(
        &self,
        params: Parameters<EntityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        check_entity_type(&params.entity_type)?;
        self.fetch_entity(&params.entity_type, &params.id, params.widgets)
            .await
    }

    #[tool(
        name = "get_paper",
        description = "Get information about a scientific paper/publication including authors, abstract, and associated genes."
    )]
    async fn get_paper(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        let widgets = vec!["overview".to_string(), "referenced_genes".to_string()];
        self.fetch_entity("paper", &params.0.id, Some(widgets)).await
    }
}

#[tool_handler]
impl ServerHandler for WormBaseTools {
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        let mut resource = RawResource::new(ENTITY_TYPES_URI, "entity-types");
        resource.description = Some("Available WormBase entity types that can be queried".into());
        resource.mime_type = Some("application/json".into());

        std::future::ready(Ok(ListResourcesResult {
            resources: vec![resource.no_annotation()],
            next_cursor: None,
            meta: Default::default(),
        }))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        let result = if request.uri == ENTITY_TYPES_URI {
            let text = serde_json::to_string_pretty(&entity_types_document())
                .unwrap_or_default();
            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, ENTITY_TYPES_URI)],
            })
        } else {
            Err(McpError {
                code: ErrorCode::RESOURCE_NOT_FOUND,
                message: Cow::from(format!("Unknown resource: {}", request.uri)),
                data: None,
            })
        };
        std::future::ready(result)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "wormbase".into(),
                title: Some("WormBase".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                description: Some(
                    "C. elegans genome database: genes, proteins, phenotypes, strains".into(),
                ),
                icons: None,
                website_url: Some("https://wormbase.org".into()),
            },
            instructions: Some(
                "WormBase biological database. Use search to find entities by name, ID, \
                 or description; get_gene and the other get_* tools for detailed records; \
                 and the wormbase://entity-types resource for the queryable entity classes."
                    .into(),
            ),
        }
    }
}
