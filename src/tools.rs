//! Named tool operations.
//!
//! [`Toolbox`] is the single context object holding the database connection.
//! Each call decodes its flat arguments, runs exactly one component and wraps
//! the outcome in a [`CallToolResponse`]. Component errors never escape: they
//! are rendered as `{"success": false, "kind": ..., "error": ...}` with
//! `isError` set.
//!
//! | Tool | Arguments | Result |
//! |------|-----------|--------|
//! | `list_tables` | - | array of names |
//! | `describe_table` | `table` | columns of one table |
//! | `describe_all` | - | full snapshot plus text summary |
//! | `execute_query` | `query`, `params?` | query result |
//! | `natural_language_query` | `request`, `execute?` | `{sql, result?}` |
//! | `build_query` | `table`, `columns?`, `where_conditions?`, `group_by?`, `order_by?`, `limit?`, `execute?` | `{sql, result?}` |
//! | `analyze_relationships` | - | array of foreign-key edges |
//! | `lint_query` | `query` | array of suggestions |

mod args;

use std::{fmt, sync::Arc};

pub use args::Args;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::{
    builder::StructuredQuery,
    db::Backend,
    error::ToolError,
    executor::{QueryResult, execute_guarded},
    lint::Linter,
    relations,
    schema::SchemaCatalog,
    server::protocol::{CallToolResponse, ToolAnnotations, ToolContent, ToolDefinition},
    synth::{PLACEHOLDER, Synthesizer}
};

/// Every exposed tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListTables,
    DescribeTable,
    DescribeAll,
    ExecuteQuery,
    NaturalLanguageQuery,
    BuildQuery,
    AnalyzeRelationships,
    LintQuery
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::ListTables,
        Tool::DescribeTable,
        Tool::DescribeAll,
        Tool::ExecuteQuery,
        Tool::NaturalLanguageQuery,
        Tool::BuildQuery,
        Tool::AnalyzeRelationships,
        Tool::LintQuery
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ListTables => "list_tables",
            Self::DescribeTable => "describe_table",
            Self::DescribeAll => "describe_all",
            Self::ExecuteQuery => "execute_query",
            Self::NaturalLanguageQuery => "natural_language_query",
            Self::BuildQuery => "build_query",
            Self::AnalyzeRelationships => "analyze_relationships",
            Self::LintQuery => "lint_query"
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListTables => "List all tables in the connected database",
            Self::DescribeTable => "Describe the columns of one table",
            Self::DescribeAll => "Describe every table in the connected database",
            Self::ExecuteQuery => {
                "Execute a read-only SQL statement (SELECT, SHOW, DESCRIBE, EXPLAIN)"
            }
            Self::NaturalLanguageQuery => {
                "Generate SQL from a plain-language request, optionally executing it"
            }
            Self::BuildQuery => {
                "Build a SELECT statement from structured parameters, optionally executing it"
            }
            Self::AnalyzeRelationships => "List foreign-key relationships between tables",
            Self::LintQuery => "Suggest improvements for a SQL statement"
        }
    }

    fn input_schema(self) -> Value {
        let properties = match self {
            Self::ListTables | Self::DescribeAll | Self::AnalyzeRelationships => json!({}),
            Self::DescribeTable => json!({
                "table": { "type": "string", "description": "Table name" }
            }),
            Self::ExecuteQuery => json!({
                "query": { "type": "string", "description": "SQL statement" },
                "params": {
                    "type": ["array", "string"],
                    "description": "Positional values for ? placeholders"
                }
            }),
            Self::NaturalLanguageQuery => json!({
                "request": { "type": "string", "description": "What to query, in plain words" },
                "execute": { "type": "boolean", "description": "Run the generated SQL" }
            }),
            Self::BuildQuery => json!({
                "table": { "type": "string" },
                "columns": { "type": "string", "description": "Comma-separated column list" },
                "where_conditions": {
                    "type": ["object", "string"],
                    "description": "Column to value, or to {\"operator\", \"value\"}"
                },
                "group_by": { "type": "string" },
                "order_by": { "type": "string" },
                "limit": { "type": "integer", "minimum": 0 },
                "execute": { "type": "boolean", "description": "Run the built SQL" }
            }),
            Self::LintQuery => json!({
                "query": { "type": "string", "description": "SQL statement" }
            })
        };
        let required: &[&str] = match self {
            Self::DescribeTable | Self::BuildQuery => &["table"],
            Self::ExecuteQuery | Self::LintQuery => &["query"],
            Self::NaturalLanguageQuery => &["request"],
            _ => &[]
        };
        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name:         self.name().to_string(),
            description:  self.description().to_string(),
            input_schema: self.input_schema(),
            annotations:  ToolAnnotations {
                read_only: true
            }
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generated SQL, plus its result when execution was requested.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuery {
    pub sql:    String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>
}

/// Connection-owning dispatch context.
pub struct Toolbox {
    backend:     Arc<dyn Backend>,
    synthesizer: Synthesizer,
    linter:      Linter
}

impl Toolbox {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            synthesizer: Synthesizer::new(),
            linter: Linter::new()
        }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        Tool::ALL.into_iter().map(Tool::definition).collect()
    }

    /// Run `tool` and wrap its outcome.
    pub async fn call(&self, tool: Tool, arguments: &Value) -> CallToolResponse {
        debug!(tool = %tool, "tool call");
        match self.dispatch(tool, arguments).await {
            Ok(response) => response,
            Err(err) => {
                warn!(tool = %tool, kind = ?err.kind(), error = %err, "tool failed");
                failure(&err)
            }
        }
    }

    async fn dispatch(&self, tool: Tool, arguments: &Value) -> Result<CallToolResponse, ToolError> {
        let args = Args::new(arguments)?;
        let catalog = SchemaCatalog::new(self.backend.as_ref());
        match tool {
            Tool::ListTables => json_result(&catalog.list_tables().await?),
            Tool::DescribeTable => {
                let table = args.required_str("table")?;
                json_result(&catalog.describe_table(table).await?)
            }
            Tool::DescribeAll => {
                let snapshot = catalog.describe_all().await?;
                Ok(CallToolResponse {
                    content:  vec![
                        ToolContent::Json {
                            json: to_json(&snapshot)?
                        },
                        ToolContent::Text {
                            text: snapshot.to_summary()
                        },
                    ],
                    is_error: false
                })
            }
            Tool::ExecuteQuery => {
                let query = args.required_str("query")?;
                let params = args.params("params")?;
                let result = execute_guarded(self.backend.as_ref(), query, &params).await;
                query_result(&result)
            }
            Tool::NaturalLanguageQuery => {
                let request = args.required_str("request")?;
                let execute = args.flag("execute")?;
                let snapshot = catalog.describe_all().await?;
                let sql = self.synthesizer.synthesize(request, &snapshot);
                info!(sql = %sql, "query synthesized");
                // the placeholder is a comment and would only be refused by the guard
                let execute = execute && sql != PLACEHOLDER;
                self.generated(sql, execute).await
            }
            Tool::BuildQuery => {
                let query = StructuredQuery {
                    table:            args.required_str("table")?.to_string(),
                    columns:          args.columns("columns")?,
                    where_conditions: args.conditions("where_conditions")?,
                    group_by:         args.optional_str("group_by")?.map(String::from),
                    order_by:         args.optional_str("order_by")?.map(String::from),
                    limit:            args.optional_u64("limit")?
                };
                let execute = args.flag("execute")?;
                self.generated(query.build(), execute).await
            }
            Tool::AnalyzeRelationships => {
                json_result(&relations::analyze(self.backend.as_ref()).await?)
            }
            Tool::LintQuery => {
                let query = args.required_str("query")?;
                let report = self.linter.report(query);
                json_result(&report.messages())
            }
        }
    }

    async fn generated(&self, sql: String, execute: bool) -> Result<CallToolResponse, ToolError> {
        let result = if execute {
            Some(execute_guarded(self.backend.as_ref(), &sql, &[]).await)
        } else {
            None
        };
        let is_error = result.as_ref().is_some_and(|r| !r.success);
        let json = to_json(&GeneratedQuery {
            sql,
            result
        })?;
        Ok(CallToolResponse {
            content: vec![ToolContent::Json {
                json
            }],
            is_error
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Execution(e.to_string()))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResponse, ToolError> {
    Ok(CallToolResponse {
        content:  vec![ToolContent::Json {
            json: to_json(value)?
        }],
        is_error: false
    })
}

fn query_result(result: &QueryResult) -> Result<CallToolResponse, ToolError> {
    Ok(CallToolResponse {
        content:  vec![ToolContent::Json {
            json: to_json(result)?
        }],
        is_error: !result.success
    })
}

/// Error envelope for a failed tool call.
pub fn failure(err: &ToolError) -> CallToolResponse {
    CallToolResponse {
        content:  vec![ToolContent::Json {
            json: json!({
                "success": false,
                "kind": err.kind(),
                "error": err.to_string()
            })
        }],
        is_error: true
    }
}
