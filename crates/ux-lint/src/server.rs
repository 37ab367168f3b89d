//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the ux-lint analyses over the MCP protocol, making them
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It loads the requested source,
//! validates option ranges, delegates to the same core functions the CLI uses
//! and returns two text items: the markdown summary, then the JSON result with
//! its `source`.
//!
//! Configured limits and defaults (input size, fetch timeout, inventory and
//! readability options) apply unless a call overrides them.
//!
//! The reference guides are also served as `ux://` resources, and the review
//! prompt templates are registered as MCP prompts.

use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, GetPromptRequestParams, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, PaginatedRequestParams,
    PromptMessage, PromptMessageRole, RawResource,
    ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents, ServerCapabilities,
    ServerInfo,
};
use rmcp::schemars;
use rmcp::service::RequestContext;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, prompt, prompt_handler, prompt_router, tool,
    tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};

use ux_lint_core::audit::AuditOptions;
use ux_lint_core::{guides, prompts};
use ux_lint_core::{Config, InventoryOptions, ReadabilityOptions};

use crate::limits::{self, Bound};
use crate::report::{self, Markdown, Report};
use crate::source::{self, LoadOptions, SourceInfo, Target};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Limits for loading a target.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchOptions {
    /// Reject input larger than this many bytes (10000-20000000).
    pub max_bytes: Option<usize>,
    /// Fetch timeout in milliseconds (100-60000).
    pub timeout_ms: Option<usize>,
}

/// Inventory tuning.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryToolOptions {
    /// Elements kept per category (10-500, default 60).
    pub max_elements_per_category: Option<usize>,
}

/// Parameters for the `ux_extract_ui_inventory` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryParams {
    /// Markup to analyze.
    pub target: Target,
    /// Inventory options.
    #[serde(default)]
    pub options: InventoryToolOptions,
    /// Loading limits.
    #[serde(default)]
    pub fetch_options: FetchOptions,
}

/// Text for the readability lint: raw text, or the body text of a target.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReadabilityInput {
    /// Plain text.
    Text {
        /// The text, at least one character.
        text: String,
    },
    /// Markup whose body text is scored.
    Target {
        /// Markup to load.
        target: Target,
    },
}

/// Readability tuning.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityToolOptions {
    /// Characters of body text taken from markup (100-200000, default 50000).
    pub max_chars: Option<usize>,
    /// Sentences with more words than this are reported (10-60, default 22).
    pub long_sentence_max_words: Option<usize>,
}

/// Parameters for the `ux_readability_lint` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityParams {
    /// What to score.
    pub input: ReadabilityInput,
    /// Readability options.
    #[serde(default)]
    pub options: ReadabilityToolOptions,
    /// Loading limits for target input.
    #[serde(default)]
    pub fetch_options: FetchOptions,
}

/// Accessibility result tuning.
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AxeToolOptions {
    /// Violations kept, in engine order (1-200, default 25).
    pub max_violations: Option<usize>,
    /// Nodes kept per violation (1-20, default 3).
    pub max_nodes_per_violation: Option<usize>,
}

/// Parameters for the `ux_normalize_axe_results` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AxeParams {
    /// Results object from an axe-style engine; only `violations` is read.
    pub results: serde_json::Value,
    /// Normalization options.
    #[serde(default)]
    pub options: AxeToolOptions,
}

/// Parameters for the `ux_reference` tool.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ReferenceParams {
    /// Guide name (e.g. "forms-checklist") or `ux://` URI. Omit to list guides.
    pub name: Option<String>,
}

/// Arguments for the `ux-heuristic-review` prompt.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicReviewArgs {
    /// Describe the UI, screen, or flow to review.
    pub feature_or_screen: String,
    /// Primary user(s) and their goal(s).
    pub users: Option<String>,
    /// Constraints like device, accessibility, performance, compliance, deadlines.
    pub constraints: Option<String>,
}

/// Arguments for the `ux-usability-test-plan` prompt.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsabilityTestPlanArgs {
    /// What decision this test informs.
    pub research_goal: String,
    /// What the product is and what we're testing.
    pub product_context: String,
    /// Recruiting criteria and target users.
    pub target_users: Option<String>,
    /// Key tasks to include.
    pub tasks_to_test: Option<String>,
}

/// Arguments for the `ux-microcopy-variants` prompt.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MicrocopyVariantsArgs {
    /// Existing UI text (button labels, errors, helper text).
    pub current_copy: String,
    /// Where the text appears and what the user is trying to do.
    pub context: String,
    /// Tone (e.g., neutral, friendly, professional).
    pub tone: Option<String>,
    /// Max characters per variant (5-140).
    pub max_length: Option<String>,
}

#[derive(Serialize)]
struct GuideEntry {
    name: &'static str,
    uri: &'static str,
    title: &'static str,
    description: &'static str,
}

fn bounded(bound: Bound, value: Option<usize>) -> Result<Option<usize>, McpError> {
    bound
        .check_opt(value)
        .map_err(|message| McpError::invalid_params(message, None))
}

fn required<'a>(name: &str, value: &'a str) -> Result<&'a str, McpError> {
    limits::require_text(name, value).map_err(|message| McpError::invalid_params(message, None))
}

/// Prompt arguments arrive as strings; empty ones count as absent.
fn optional(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn user_message(text: String) -> Vec<PromptMessage> {
    vec![PromptMessage::new_text(PromptMessageRole::User, text)]
}

fn tool_result<T: Markdown + Serialize>(report: &Report<T>) -> Result<CallToolResult, McpError> {
    let json = report
        .to_json()
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![
        Content::text(report.markdown()),
        Content::text(json),
    ]))
}

/// MCP server exposing the ux-lint analyses to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block and each
/// `#[prompt]` method in the `#[prompt_router]` impl block is registered
/// automatically.
#[derive(Clone)]
pub struct UxServer {
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
    config: Config,
}

impl Default for UxServer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl UxServer {
    fn load_options(&self, fetch: &FetchOptions) -> Result<LoadOptions, McpError> {
        let max_bytes = bounded(limits::MAX_BYTES, fetch.max_bytes)?;
        let timeout_ms = bounded(limits::TIMEOUT_MS, fetch.timeout_ms)?;
        Ok(LoadOptions {
            max_bytes: max_bytes.or_else(|| self.config.input_limit()),
            timeout_ms: timeout_ms.map_or_else(|| self.config.fetch_timeout_ms(), |ms| ms as u64),
        })
    }

    async fn load(
        &self,
        target: &Target,
        fetch: &FetchOptions,
    ) -> Result<source::LoadedSource, McpError> {
        let options = self.load_options(fetch)?;
        source::load_target(target, &options)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// Every reference guide as an MCP resource.
    fn guide_resources() -> Vec<Resource> {
        guides::all_guides()
            .iter()
            .map(|guide| {
                let mut raw = RawResource::new(guide.uri, guide.name);
                raw.description = Some(guide.description.to_string());
                raw.mime_type = Some(guides::GUIDE_MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect()
    }

    fn read_guide(uri: &str) -> Result<ReadResourceResult, McpError> {
        let guide = guides::all_guides()
            .iter()
            .find(|guide| guide.uri == uri)
            .ok_or_else(|| {
                McpError::resource_not_found(
                    format!("resource not found: {uri}"),
                    Some(serde_json::json!({ "uri": uri })),
                )
            })?;
        tracing::debug!(guide = guide.name, "read guide resource");
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(guide.text, uri)],
        })
    }
}

#[tool_router]
impl UxServer {
    /// Create a server that applies `config` to every call.
    pub fn new(config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
            config,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        #[allow(unused_variables)] Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "fetch": cfg!(feature = "fetch"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Build a UI inventory with quick usability issues.
    #[tool(
        description = "Parse HTML (from URL, file, or raw) and return a structured inventory of headings, links, buttons, forms, images, and quick UX issues."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn ux_extract_ui_inventory(
        &self,
        Parameters(params): Parameters<InventoryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "ux_extract_ui_inventory", "executing MCP tool");

        let max_elements = bounded(
            limits::MAX_ELEMENTS_PER_CATEGORY,
            params.options.max_elements_per_category,
        )?;
        let options = InventoryOptions {
            max_elements_per_category: max_elements
                .unwrap_or_else(|| self.config.inventory_options().max_elements_per_category),
        };
        let loaded = self.load(&params.target, &params.fetch_options).await?;
        let report = report::inventory(loaded, &options);

        tracing::info!(
            tool = "ux_extract_ui_inventory",
            issues = report.result.issues.len(),
            "MCP tool completed"
        );
        tool_result(&report)
    }

    /// Score readability and flag long sentences.
    #[tool(
        description = "Compute readability metrics (Flesch) and flag long sentences. Input can be raw text or HTML/URL/file (text extracted from HTML body)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn ux_readability_lint(
        &self,
        Parameters(params): Parameters<ReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "ux_readability_lint", "executing MCP tool");

        let max_chars = bounded(limits::MAX_CHARS, params.options.max_chars)?
            .unwrap_or_else(|| self.config.max_chars());
        let long_sentence_max_words = bounded(
            limits::LONG_SENTENCE_MAX_WORDS,
            params.options.long_sentence_max_words,
        )?;
        let options = ReadabilityOptions {
            long_sentence_max_words: long_sentence_max_words
                .unwrap_or_else(|| self.config.readability_options().long_sentence_max_words),
        };

        let report = match &params.input {
            ReadabilityInput::Text { text } => {
                limits::require_text("text", text)
                    .map_err(|msg| McpError::invalid_params(msg, None))?;
                let max_bytes = self.load_options(&params.fetch_options)?.max_bytes;
                let loaded = source::load_inline(text, SourceInfo::Text, max_bytes)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                report::readability_of_text(&loaded.content, &options)
            }
            ReadabilityInput::Target { target } => {
                let loaded = self.load(target, &params.fetch_options).await?;
                report::readability_of_markup(loaded, max_chars, &options)
            }
        };

        tracing::info!(
            tool = "ux_readability_lint",
            words = report.result.metrics.counts.words,
            findings = report.result.findings.len(),
            "MCP tool completed"
        );
        tool_result(&report)
    }

    /// Summarize accessibility engine results.
    #[tool(
        description = "Normalize axe-core style accessibility results: keep the top violations and a few nodes each, and count violations by impact."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn ux_normalize_axe_results(
        &self,
        Parameters(params): Parameters<AxeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "ux_normalize_axe_results", "executing MCP tool");

        let defaults = AuditOptions::default();
        let options = AuditOptions {
            max_violations: bounded(limits::MAX_VIOLATIONS, params.options.max_violations)?
                .unwrap_or(defaults.max_violations),
            max_nodes_per_violation: bounded(
                limits::MAX_NODES_PER_VIOLATION,
                params.options.max_nodes_per_violation,
            )?
            .unwrap_or(defaults.max_nodes_per_violation),
        };

        let json = serde_json::to_string(&params.results)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
        let loaded = source::load_inline(&json, SourceInfo::Json, self.config.input_limit())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let report = report::axe(loaded, &options)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "ux_normalize_axe_results",
            violations = report.result.summary.violations,
            "MCP tool completed"
        );
        tool_result(&report)
    }

    /// Read a built-in UX reference guide.
    #[tool(
        description = "Read a UX reference guide by name or ux:// URI: nielsen-heuristics, pour-wcag, forms-checklist, usability-test-template. Omit the name to list them."
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn ux_reference(
        &self,
        Parameters(params): Parameters<ReferenceParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "ux_reference", name = ?params.name, "executing MCP tool");

        let Some(name) = params.name.as_deref() else {
            let entries: Vec<GuideEntry> = guides::all_guides()
                .iter()
                .map(|guide| GuideEntry {
                    name: guide.name,
                    uri: guide.uri,
                    title: guide.title,
                    description: guide.description,
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
            return Ok(CallToolResult::success(vec![Content::text(json)]));
        };

        let guide = guides::find_guide(name).ok_or_else(|| {
            McpError::invalid_params(format!("unknown guide: {name}"), None)
        })?;

        tracing::info!(tool = "ux_reference", guide = guide.name, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(guide.text)]))
    }
}

#[prompt_router]
impl UxServer {
    #[prompt(
        name = "ux-heuristic-review",
        description = "Heuristic evaluation for a screen/flow (Nielsen heuristics + actionable fixes)."
    )]
    async fn ux_heuristic_review(
        &self,
        Parameters(args): Parameters<HeuristicReviewArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        let screen = required("featureOrScreen", &args.feature_or_screen)?;
        Ok(user_message(prompts::heuristic_review(
            screen,
            optional(args.users.as_ref()),
            optional(args.constraints.as_ref()),
        )))
    }

    #[prompt(
        name = "ux-usability-test-plan",
        description = "Draft a moderated usability test plan (tasks, success criteria, questions)."
    )]
    async fn ux_usability_test_plan(
        &self,
        Parameters(args): Parameters<UsabilityTestPlanArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        let goal = required("researchGoal", &args.research_goal)?;
        let context = required("productContext", &args.product_context)?;
        Ok(user_message(prompts::usability_test_plan(
            goal,
            context,
            optional(args.target_users.as_ref()),
            optional(args.tasks_to_test.as_ref()),
        )))
    }

    #[prompt(
        name = "ux-microcopy-variants",
        description = "Generate concise microcopy options with rationale and accessibility notes."
    )]
    async fn ux_microcopy_variants(
        &self,
        Parameters(args): Parameters<MicrocopyVariantsArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        let current_copy = required("currentCopy", &args.current_copy)?;
        let context = required("context", &args.context)?;
        let max_length = optional(args.max_length.as_ref())
            .map(|raw| limits::MICROCOPY_MAX_LENGTH.parse(raw))
            .transpose()
            .map_err(|message| McpError::invalid_params(message, None))?;
        Ok(user_message(prompts::microcopy_variants(
            current_copy,
            context,
            optional(args.tone.as_ref()),
            max_length,
        )))
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for UxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Inventory a page's UI, lint its readability, summarize \
                 accessibility engine results, or read a UX reference guide. Guides are \
                 also available as ux:// resources, and review prompts are provided.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(Self::guide_resources()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Self::read_guide(&request.uri)
    }
}
