//! Row sources for the scanner.
//!
//! A source returns, per target, every row whose searched columns contain
//! "script" anywhere. That substring test is only a cheap prefilter; real
//! matching happens in the fingerprint extractor.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::error::ScanError;
use crate::snapshot::ScanRow;
use super::targets::ScanTarget;

pub trait RowSource {
    fn name(&self) -> &str;
    fn fetch(&self, target: &ScanTarget) -> Result<Vec<ScanRow>, ScanError>;
}

pub struct SqliteSource {
    name: String,
    conn: Connection,
}

impl SqliteSource {
    /// Opens an existing database read-only.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ScanError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(SqliteSource {
            name: path.display().to_string(),
            conn,
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        SqliteSource {
            name: "sqlite".to_string(),
            conn,
        }
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// SELECT key, col... FROM table WHERE <columns joined by ','> LIKE '%script%'
fn build_query(target: &ScanTarget) -> String {
    let columns: Vec<String> = target.columns.iter().map(|c| quote_ident(c)).collect();
    let haystack = columns
        .iter()
        .map(|c| format!("COALESCE({c}, '')"))
        .collect::<Vec<_>>()
        .join(" || ',' || ");

    format!(
        "SELECT {}, {} FROM {} WHERE {} LIKE '%script%'",
        quote_ident(&target.key),
        columns.join(", "),
        quote_ident(&target.table),
        haystack
    )
}

/// Record ids are kept as text; integer keys render in decimal.
fn record_id(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn column_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Integer(_) | ValueRef::Real(_) | ValueRef::Null => String::new(),
    }
}

impl RowSource for SqliteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, target: &ScanTarget) -> Result<Vec<ScanRow>, ScanError> {
        let query_err = |source| ScanError::Query {
            table: target.table.clone(),
            source,
        };

        let sql = build_query(target);
        log::debug!("{}: {sql}", self.name);

        let mut stmt = self.conn.prepare(&sql).map_err(query_err)?;
        let mut rows = stmt.query([]).map_err(query_err)?;
        let mut out = Vec::new();

        while let Some(row) = rows.next().map_err(query_err)? {
            let Some(record) = record_id(row.get_ref(0).map_err(query_err)?) else {
                log::warn!("{}: skipping row with unusable '{}' value", target.table, target.key);
                continue;
            };

            for (idx, column) in target.columns.iter().enumerate() {
                let text = column_text(row.get_ref(idx + 1).map_err(query_err)?);
                if text.is_empty() {
                    continue;
                }
                out.push(ScanRow {
                    table: target.table.clone(),
                    record: record.clone(),
                    column: column.clone(),
                    text,
                });
            }
        }

        Ok(out)
    }
}
