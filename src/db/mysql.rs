use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::Value;
use sqlx::{
    Column, Connection, Decode, MySql, Row as _, Type, TypeInfo,
    mysql::{MySqlArguments, MySqlConnectOptions, MySqlConnection, MySqlRow},
    query::Query
};
use tokio::sync::Mutex;
use tracing::debug;

use super::{Backend, Row, SqlValue, settle_cell};
use crate::{
    builder::Literal,
    config::DatabaseConfig,
    error::{AppResult, ToolError, config_error, connection_error}
};

/// MySQL backend over one long-lived connection.
///
/// The connection sits behind an async mutex: a call holds the lock from
/// execute to the last fetched row, and the guard is dropped on every exit
/// path, so calls are serialized rather than interleaved.
pub struct MySqlBackend {
    conn: Mutex<MySqlConnection>
}

impl MySqlBackend {
    /// Open the connection described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the options are invalid or the server is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(config)?;
        let conn = MySqlConnection::connect_with(&options)
            .await
            .map_err(connection_error)?;
        Ok(Self {
            conn: Mutex::new(conn)
        })
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> AppResult<()> {
        self.conn
            .into_inner()
            .close()
            .await
            .map_err(connection_error)
    }
}

fn connect_options(config: &DatabaseConfig) -> AppResult<MySqlConnectOptions> {
    if let Some(url) = &config.url {
        return url
            .parse::<MySqlConnectOptions>()
            .map_err(|e| config_error(format!("Invalid database URL: {}", e)));
    }
    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user);
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    if let Some(database) = &config.database {
        options = options.database(database);
    }
    Ok(options)
}

#[async_trait]
impl Backend for MySqlBackend {
    async fn fetch_all(&self, sql: &str, params: &[Literal]) -> Result<Vec<Row>, ToolError> {
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, param| bind_literal(query, param));
        let rows = {
            let mut conn = self.conn.lock().await;
            query.fetch_all(&mut *conn).await?
        };
        debug!(rows = rows.len(), "fetched rows");
        rows.iter().map(decode_row).collect()
    }
}

fn bind_literal<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    literal: &'q Literal
) -> Query<'q, MySql, MySqlArguments> {
    match literal {
        Literal::Text(s) => query.bind(s.as_str()),
        Literal::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(u) = n.as_u64() {
                query.bind(u)
            } else {
                query.bind(n.as_f64())
            }
        }
        Literal::Bool(b) => query.bind(*b),
        Literal::Null => query.bind(None::<String>)
    }
}

fn decode_row(row: &MySqlRow) -> Result<Row, ToolError> {
    row.columns()
        .iter()
        .map(|col| {
            let value = decode_cell(row, col.ordinal(), col.name(), col.type_info().name())?;
            Ok((col.name().to_string(), value))
        })
        .collect()
}

fn get<'r, T>(row: &'r MySqlRow, idx: usize) -> Result<Option<T>, sqlx::Error>
where
    T: Decode<'r, MySql> + Type<MySql>
{
    row.try_get::<Option<T>, _>(idx)
}

fn typed<'r, T>(
    row: &'r MySqlRow,
    idx: usize,
    wrap: impl FnOnce(T) -> SqlValue
) -> Option<Result<Option<SqlValue>, sqlx::Error>>
where
    T: Decode<'r, MySql> + Type<MySql>
{
    Some(get::<T>(row, idx).map(|v| v.map(wrap)))
}

fn decode_cell(
    row: &MySqlRow,
    idx: usize,
    column: &str,
    type_name: &str
) -> Result<SqlValue, ToolError> {
    let decoded = match type_name {
        "BOOLEAN" => typed(row, idx, SqlValue::Bool),
        t if t.ends_with("UNSIGNED") => typed(row, idx, SqlValue::UInt),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => typed(row, idx, SqlValue::Int),
        "YEAR" => typed(row, idx, |y: u16| SqlValue::Int(y.into())),
        "FLOAT" | "DOUBLE" => typed(row, idx, SqlValue::Float),
        "DECIMAL" => typed(row, idx, |d: BigDecimal| SqlValue::Decimal(d.to_string())),
        "DATE" => typed(row, idx, SqlValue::Date),
        "DATETIME" => typed(row, idx, SqlValue::DateTime),
        "TIMESTAMP" => typed(row, idx, SqlValue::Timestamp),
        "TIME" => typed(row, idx, SqlValue::Time),
        "JSON" => typed(row, idx, |j: sqlx::types::Json<Value>| SqlValue::Json(j.0)),
        t if t.contains("BLOB") || t.contains("BINARY") || t == "BIT" || t == "GEOMETRY" => {
            typed(row, idx, SqlValue::Bytes)
        }
        _ => None
    };
    settle_cell(column, decoded, || match get::<String>(row, idx) {
        Ok(text) => Ok(text.map(SqlValue::Text)),
        Err(_) => get::<Vec<u8>>(row, idx).map(|b| b.map(SqlValue::Bytes))
    })
}
