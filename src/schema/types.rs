use std::fmt;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Serialize;

/// Index participation of a column, as reported by MySQL's `COLUMN_KEY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyRole {
    #[default]
    None,
    /// `PRI`
    Primary,
    /// `UNI`
    Unique,
    /// `MUL`: first column of a non-unique index
    Multi
}

impl KeyRole {
    /// Decode a `COLUMN_KEY` marker; unknown markers count as no role.
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim().to_ascii_uppercase().as_str() {
            "PRI" => Self::Primary,
            "UNI" => Self::Unique,
            "MUL" => Self::Multi,
            _ => Self::None
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Primary => write!(f, "PRIMARY KEY"),
            Self::Unique => write!(f, "UNIQUE"),
            Self::Multi => write!(f, "INDEXED")
        }
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name:          CompactString,
    /// Raw database type (e.g., "varchar(255)", "int unsigned")
    pub declared_type: String,
    /// Whether NULL values are allowed
    pub nullable:      bool,
    pub key_role:      KeyRole,
    pub default_value: Option<String>,
    /// Extra attributes such as `auto_increment`
    pub extra:         String
}

impl ColumnDescriptor {
    /// Non-nullable column without key role, default or extras.
    pub fn new(name: &str, declared_type: &str) -> Self {
        Self {
            name:          name.into(),
            declared_type: declared_type.to_string(),
            nullable:      false,
            key_role:      KeyRole::None,
            default_value: None,
            extra:         String::new()
        }
    }

    pub fn with_key_role(mut self, key_role: KeyRole) -> Self {
        self.key_role = key_role;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declared type contains one of `int`, `decimal`, `float`, `double`.
    pub fn is_numeric(&self) -> bool {
        type_contains_any(&self.declared_type, &["int", "decimal", "float", "double"])
    }

    /// Declared type contains one of `date`, `time`, `year`.
    pub fn is_temporal(&self) -> bool {
        type_contains_any(&self.declared_type, &["date", "time", "year"])
    }
}

fn type_contains_any(declared_type: &str, needles: &[&str]) -> bool {
    let lower = declared_type.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// One table and its columns in storage order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns:    Vec<ColumnDescriptor>
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name.as_str() == name)
    }
}

/// Point-in-time view of all tables, in listing order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct SchemaSnapshot {
    tables: IndexMap<String, TableSchema>
}

impl SchemaSnapshot {
    pub fn insert(&mut self, table: TableSchema) {
        self.tables.insert(table.table_name.clone(), table);
    }

    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.tables.get(table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Human-readable schema description
    pub fn to_summary(&self) -> String {
        let mut summary = String::from("Database Schema:\n\n");
        for table in self.tables.values() {
            summary.push_str(&format!("Table: {}\n", table.table_name));
            summary.push_str("Columns:\n");
            for col in &table.columns {
                let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
                let key = match col.key_role {
                    KeyRole::None => String::new(),
                    role => format!(" {}", role)
                };
                let default = col
                    .default_value
                    .as_ref()
                    .map(|d| format!(" DEFAULT {}", d))
                    .unwrap_or_default();
                let extra = if col.extra.is_empty() {
                    String::new()
                } else {
                    format!(" {}", col.extra)
                };
                summary.push_str(&format!(
                    "  - {name} {data_type} {nullable}{key}{default}{extra}\n",
                    name = col.name,
                    data_type = col.declared_type,
                    nullable = nullable,
                    key = key,
                    default = default,
                    extra = extra
                ));
            }
            summary.push('\n');
        }
        summary
    }
}

impl FromIterator<TableSchema> for SchemaSnapshot {
    fn from_iter<I: IntoIterator<Item = TableSchema>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for table in iter {
            snapshot.insert(table);
        }
        snapshot
    }
}
