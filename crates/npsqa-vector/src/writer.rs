//! Batched inserts of embedded knowledge-base passages.
use anyhow::{ensure, Result};
use arrow_array::{FixedSizeListArray, Int64Array, RecordBatch, RecordBatchIterator, StringArray, TimestampMillisecondArray};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::Connection;
use std::sync::Arc;
use tracing::info;

use npsqa_core::types::KnowledgeDocument;

use crate::schema::{build_documents_schema, EMBEDDING_DIM};

pub const INSERT_BATCH_SIZE: usize = 64;

fn content_hash(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

pub(crate) fn docs_to_record_batch(docs: &[KnowledgeDocument], vectors: &[Vec<f32>]) -> Result<RecordBatch> {
    ensure!(docs.len() == vectors.len(), "documents and embeddings length must match ({} vs {})", docs.len(), vectors.len());
    let now = Utc::now().timestamp_millis();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
    let sources: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
    let indices = docs.iter().map(|d| i64::try_from(d.doc_index)).collect::<Result<Vec<i64>, _>>()?;
    let hashes: Vec<String> = docs.iter().map(|d| content_hash(&d.content)).collect();
    let added_at: Vec<i64> = vec![now; docs.len()];
    let vecs = vectors.iter().map(|v| Some(v.iter().copied().map(Some).collect::<Vec<_>>()));

    Ok(RecordBatch::try_new(
        build_documents_schema(),
        vec![
            Arc::new(StringArray::from(ids)),
            Arc::new(StringArray::from(contents)),
            Arc::new(StringArray::from(sources)),
            Arc::new(Int64Array::from(indices)),
            Arc::new(StringArray::from(hashes)),
            Arc::new(TimestampMillisecondArray::from(added_at)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(vecs, EMBEDDING_DIM)),
        ],
    )?)
}

pub(crate) async fn insert_batch(conn: &Connection, table: &str, batch: RecordBatch) -> Result<()> {
    let schema = batch.schema();
    let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
    conn.open_table(table).execute().await?.add(reader).execute().await?;
    Ok(())
}

/// Embed `docs` in batches and append them to `table`.
pub(crate) async fn write_documents(
    conn: &Connection,
    table: &str,
    embedder: &dyn npsqa_core::traits::Embedder,
    docs: &[KnowledgeDocument],
) -> Result<usize> {
    if docs.is_empty() {
        return Ok(0);
    }
    info!(count = docs.len(), table, "adding documents");
    let pb = progress_bar(docs.len());
    let mut written = 0usize;
    for chunk in docs.chunks(INSERT_BATCH_SIZE) {
        let texts: Vec<String> = chunk.iter().map(|d| d.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts)?;
        insert_batch(conn, table, docs_to_record_batch(chunk, &vectors)?).await?;
        written += chunk.len();
        pb.set_position(written as u64);
    }
    pb.finish_with_message("done");
    info!(written, table, "documents added");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::Array;

    #[test]
    fn record_batch_carries_hash_and_vector() {
        let docs = vec![KnowledgeDocument { id: "a".into(), content: "hello".into(), source: "s".into(), doc_index: 0 }];
        let vectors = vec![vec![0.0f32; EMBEDDING_DIM as usize]];
        let batch = docs_to_record_batch(&docs, &vectors).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 7);
        let hash = batch.column_by_name("content_hash").unwrap().as_any().downcast_ref::<StringArray>().unwrap().value(0).to_string();
        assert_eq!(hash, content_hash("hello"));
    }

    #[test]
    fn doc_index_is_stored_as_int64() {
        let docs = vec![KnowledgeDocument { id: "a".into(), content: "x".into(), source: "s".into(), doc_index: 3_000_000_000 }];
        let vectors = vec![vec![0.0f32; EMBEDDING_DIM as usize]];
        let batch = docs_to_record_batch(&docs, &vectors).unwrap();
        let index = batch.column_by_name("doc_index").unwrap().as_any().downcast_ref::<Int64Array>().unwrap().value(0);
        assert_eq!(index, 3_000_000_000);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let docs = vec![KnowledgeDocument { id: "a".into(), content: "x".into(), source: "s".into(), doc_index: 0 }];
        assert!(docs_to_record_batch(&docs, &[]).is_err());
    }
}
