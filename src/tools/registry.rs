//! The document tools and their dispatch.

use serde::Serialize;
use serde_json::{json, Value};

use super::result::ToolCallResult;
use super::schema::{FieldSpec, FieldType, Schema};
use super::translate;
use crate::backend::{Backend, HttpMethod};
use crate::error::ToolError;

/// How a tool's validated arguments map onto a backend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `POST path` with the whole argument object as JSON body.
    JsonBody {
        /// Request path.
        path: &'static str,
    },
    /// `GET path` with each defined argument as a query parameter.
    Query {
        /// Request path.
        path: &'static str,
    },
    /// `method prefix{param}` with no body.
    PathParam {
        /// HTTP method.
        method: HttpMethod,
        /// Path before the substituted segment.
        prefix: &'static str,
        /// Argument substituted into the path.
        param: &'static str,
    },
    /// `method path` with no arguments.
    Fixed {
        /// HTTP method.
        method: HttpMethod,
        /// Request path.
        path: &'static str,
    },
}

/// A registered tool: what the agent sees plus how to reach the backend.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Parameter schema.
    pub schema: Schema,
    /// Backend mapping.
    pub route: Route,
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

impl From<&ToolSpec> for ToolDefinition {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            description: Some(spec.description.to_string()),
            input_schema: spec.schema.to_json_schema(),
        }
    }
}

/// Returns the knowledge base tools in registration order.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn document_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "create_document",
            description: "Add a document to the knowledge base.",
            schema: Schema::new(vec![
                FieldSpec::required("content", FieldType::String, "Full text of the document"),
                FieldSpec::optional(
                    "metadata",
                    FieldType::Object(vec![
                        FieldSpec::optional(
                            "tags",
                            FieldType::StringArray,
                            "Free-form tags attached to the document",
                        ),
                        FieldSpec::optional(
                            "categories",
                            FieldType::StringArray,
                            "Categories the document belongs to",
                        ),
                    ]),
                    "Optional document metadata",
                ),
            ]),
            route: Route::JsonBody { path: "/documents/" },
        },
        ToolSpec {
            name: "search_documents",
            description: "Search the knowledge base for information related to a query.",
            schema: Schema::new(vec![
                FieldSpec::required("query", FieldType::String, "Natural-language search query"),
                FieldSpec::optional("k", FieldType::Number, "Number of results to return")
                    .with_default(json!(5)),
                FieldSpec::optional(
                    "tags",
                    FieldType::StringArray,
                    "Only return documents carrying these tags",
                ),
                FieldSpec::optional(
                    "categories",
                    FieldType::StringArray,
                    "Only return documents in these categories",
                ),
            ]),
            route: Route::JsonBody {
                path: "/documents/search/",
            },
        },
        ToolSpec {
            name: "get_document",
            description: "Fetch a document from the knowledge base by its ID.",
            schema: Schema::new(vec![FieldSpec::required(
                "document_id",
                FieldType::String,
                "ID of the document",
            )]),
            route: Route::PathParam {
                method: HttpMethod::Get,
                prefix: "/documents/",
                param: "document_id",
            },
        },
        ToolSpec {
            name: "list_documents",
            description: "List documents in the knowledge base, page by page.",
            schema: Schema::new(vec![
                FieldSpec::optional("skip", FieldType::Number, "Number of documents to skip")
                    .with_default(json!(0)),
                FieldSpec::optional("limit", FieldType::Number, "Maximum documents to return")
                    .with_default(json!(100)),
                FieldSpec::optional("tag", FieldType::String, "Only list documents with this tag"),
                FieldSpec::optional(
                    "category",
                    FieldType::String,
                    "Only list documents in this category",
                ),
            ]),
            route: Route::Query { path: "/documents/" },
        },
        ToolSpec {
            name: "get_stats",
            description: "Get statistics about the knowledge base.",
            schema: Schema::default(),
            route: Route::Fixed {
                method: HttpMethod::Get,
                path: "/documents/stats/overview",
            },
        },
        ToolSpec {
            name: "delete_document",
            description: "Delete a document from the knowledge base by its ID.",
            schema: Schema::new(vec![FieldSpec::required(
                "document_id",
                FieldType::String,
                "ID of the document",
            )]),
            route: Route::PathParam {
                method: HttpMethod::Delete,
                prefix: "/documents/",
                param: "document_id",
            },
        },
    ]
}

/// The set of tools exposed to the agent.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    /// Creates a registry holding the document tools.
    #[must_use]
    pub fn new() -> Self {
        Self::from_specs(document_tools())
    }

    /// Creates a registry from arbitrary tool specs.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if two specs share a name.
    #[must_use]
    pub fn from_specs(tools: Vec<ToolSpec>) -> Self {
        debug_assert!(
            tools
                .iter()
                .enumerate()
                .all(|(i, t)| tools[..i].iter().all(|other| other.name != t.name)),
            "tool names must be unique"
        );
        Self { tools }
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Iterates over registered tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter()
    }

    /// Returns the definitions advertised in `tools/list`.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(ToolDefinition::from).collect()
    }

    /// Validates the arguments and runs the named tool against `backend`.
    ///
    /// Nothing is sent when the tool is unknown or the arguments are invalid.
    ///
    /// # Errors
    ///
    /// - [`ToolError::UnknownTool`] if no tool has this name
    /// - [`ToolError::InvalidArguments`] if the schema rejects the arguments
    /// - [`ToolError::Backend`] if the backend call fails
    pub async fn call<B: Backend + ?Sized>(
        &self,
        backend: &B,
        name: &str,
        arguments: &Value,
    ) -> Result<ToolCallResult, ToolError> {
        let spec = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
        })?;

        let validated =
            spec.schema
                .validate(arguments)
                .map_err(|message| ToolError::InvalidArguments {
                    tool: name.to_string(),
                    message,
                })?;

        let request = translate::build_request(&spec.route, &validated);
        tracing::debug!(
            tool = name,
            method = %request.method,
            path = %request.path,
            "Dispatching tool call"
        );

        translate::execute(backend, name, &request)
            .await
            .map_err(ToolError::from)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
