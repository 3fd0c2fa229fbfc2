//! Scripted in-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use sql_tool_server::{
    builder::Literal,
    db::{Backend, Row, SqlValue},
    error::ToolError
};

struct Script {
    needle: String,
    param:  Option<Literal>,
    result: Result<Vec<Row>, ToolError>
}

/// Answers by the first script whose needle occurs in the SQL (and whose
/// parameter matches the first bound value, when set). Unscripted
/// statements return no rows. Every call is recorded.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: Vec<Script>,
    calls:   Mutex<Vec<(String, Vec<Literal>)>>
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, needle: &str, rows: Vec<Row>) -> Self {
        self.scripts.push(Script {
            needle: needle.to_string(),
            param:  None,
            result: Ok(rows)
        });
        self
    }

    pub fn on_param(mut self, needle: &str, param: &str, rows: Vec<Row>) -> Self {
        self.scripts.push(Script {
            needle: needle.to_string(),
            param:  Some(Literal::from(param)),
            result: Ok(rows)
        });
        self
    }

    pub fn fail(mut self, needle: &str, err: ToolError) -> Self {
        self.scripts.push(Script {
            needle: needle.to_string(),
            param:  None,
            result: Err(err)
        });
        self
    }

    /// Script `SHOW TABLES` and one column listing per table.
    pub fn with_tables(mut self, tables: &[(&str, Vec<Row>)]) -> Self {
        let listing = tables
            .iter()
            .map(|(name, _)| row(&[("Tables_in_shop", SqlValue::from(*name))]))
            .collect();
        self = self.on("SHOW TABLES", listing);
        for (name, columns) in tables {
            self = self.on_param("information_schema.COLUMNS", name, columns.clone());
        }
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Literal>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn fetch_all(&self, sql: &str, params: &[Literal]) -> Result<Vec<Row>, ToolError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        self.scripts
            .iter()
            .find(|s| {
                sql.contains(&s.needle)
                    && s.param.as_ref().is_none_or(|p| params.first() == Some(p))
            })
            .map(|s| s.result.clone())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn row(cells: &[(&str, SqlValue)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// One `information_schema.COLUMNS` row as the catalog query returns it.
pub fn column(name: &str, declared_type: &str, nullable: bool, key: &str) -> Row {
    row(&[
        ("name", SqlValue::from(name)),
        ("declared_type", SqlValue::from(declared_type)),
        ("nullable", SqlValue::from(if nullable { "YES" } else { "NO" })),
        ("key_role", SqlValue::from(key)),
        ("default_value", SqlValue::Null),
        ("extra", SqlValue::from(""))
    ])
}

pub fn orders_columns() -> Vec<Row> {
    vec![
        column("id", "int", false, "PRI"),
        column("customer_id", "int", false, "MUL"),
        column("status", "varchar(32)", false, ""),
        column("total", "decimal(10,2)", true, ""),
        column("created_at", "datetime", false, "")
    ]
}

pub fn customers_columns() -> Vec<Row> {
    vec![
        column("id", "int", false, "PRI"),
        column("name", "varchar(255)", false, ""),
        column("email", "varchar(255)", true, "UNI")
    ]
}

/// Two-table shop database.
pub fn shop_backend() -> ScriptedBackend {
    ScriptedBackend::new().with_tables(&[
        ("customers", customers_columns()),
        ("orders", orders_columns())
    ])
}
