//! LanceDB connection and table housekeeping.
use anyhow::Result;
use arrow_array::RecordBatchIterator;
use lancedb::{connect, Connection};
use tracing::debug;

use crate::schema::build_documents_schema;

pub async fn open_db(uri: &str) -> Result<Connection> {
    Ok(connect(uri).execute().await?)
}

pub async fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    Ok(conn.table_names().execute().await?.iter().any(|n| n == name))
}

/// Create the documents table with zero rows if it does not exist yet.
pub async fn ensure_documents_table(conn: &Connection, name: &str) -> Result<()> {
    if table_exists(conn, name).await? {
        return Ok(());
    }
    let schema = build_documents_schema();
    let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
    conn.create_table(name, Box::new(iter)).execute().await?;
    debug!(table = name, "created empty documents table");
    Ok(())
}

/// Row count; a missing table counts as empty.
pub async fn count_rows(conn: &Connection, name: &str) -> Result<usize> {
    if !table_exists(conn, name).await? {
        return Ok(0);
    }
    let table = conn.open_table(name).execute().await?;
    Ok(table.count_rows(None).await?)
}

/// Remove every row, keeping the table and its schema.
pub async fn clear_table(conn: &Connection, name: &str) -> Result<()> {
    if !table_exists(conn, name).await? {
        return Ok(());
    }
    let table = conn.open_table(name).execute().await?;
    table.delete("true").await?;
    Ok(())
}
