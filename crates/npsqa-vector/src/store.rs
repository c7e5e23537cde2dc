use anyhow::{anyhow, Result};
use arrow_array::{Array, Float32Array, RecordBatch, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, DistanceType};
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use npsqa_core::traits::{DocumentStore, Embedder, Retriever};
use npsqa_core::types::{KnowledgeDocument, RetrievedDocument};

use crate::table;
use crate::writer;

/// Knowledge-base table behind a blocking API.
///
/// The store owns a tokio runtime and drives every LanceDB future with
/// `block_on`, so it must not be used from inside another runtime.
pub struct LanceVectorStore {
    rt: Runtime,
    db: Connection,
    table_name: String,
    embedder: Box<dyn Embedder>,
}

impl LanceVectorStore {
    pub fn open(db_path: &Path, table_name: &str, embedder: Box<dyn Embedder>) -> Result<Self> {
        let rt = Runtime::new()?;
        let uri = db_path.to_string_lossy().to_string();
        let db = rt.block_on(async {
            let db = table::open_db(&uri).await?;
            table::ensure_documents_table(&db, table_name).await?;
            anyhow::Ok(db)
        })?;
        info!(db = %uri, table = table_name, "opened vector store");
        Ok(Self { rt, db, table_name: table_name.to_string(), embedder })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn nearest(&self, vector: Vec<f32>, k: usize) -> Result<Vec<RetrievedDocument>> {
        let table = self.db.open_table(&self.table_name).execute().await?;
        let mut stream = table.vector_search(vector)?.distance_type(DistanceType::Cosine).limit(k).execute().await?;
        let mut hits = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            hits.extend(hits_from_batch(&batch)?);
        }
        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("{name} column missing"))
}

fn hits_from_batch(batch: &RecordBatch) -> Result<Vec<RetrievedDocument>> {
    let ids = string_column(batch, "id")?;
    let contents = string_column(batch, "content")?;
    let distances = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .ok_or_else(|| anyhow!("_distance column missing"))?;
    Ok((0..batch.num_rows())
        .map(|i| RetrievedDocument {
            id: ids.value(i).to_string(),
            text: contents.value(i).to_string(),
            distance: if distances.is_valid(i) { distances.value(i) } else { f32::MAX },
        })
        .collect())
}

impl Retriever for LanceVectorStore {
    fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        if query.trim().is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if self.count()? == 0 {
            debug!(table = %self.table_name, "search on empty table");
            return Ok(Vec::new());
        }
        let vector = self
            .embedder
            .embed_batch(&[query.to_string()])?
            .pop()
            .ok_or_else(|| anyhow!("embedder returned no vector"))?;
        let hits = self.rt.block_on(self.nearest(vector, k))?;
        debug!(k, found = hits.len(), "vector search");
        Ok(hits)
    }
}

impl DocumentStore for LanceVectorStore {
    fn add_documents(&self, docs: &[KnowledgeDocument]) -> Result<usize> {
        self.rt.block_on(writer::write_documents(&self.db, &self.table_name, self.embedder.as_ref(), docs))
    }

    fn count(&self) -> Result<usize> {
        self.rt.block_on(table::count_rows(&self.db, &self.table_name))
    }

    fn clear(&self) -> Result<()> {
        self.rt.block_on(table::clear_table(&self.db, &self.table_name))?;
        info!(table = %self.table_name, "cleared documents");
        Ok(())
    }
}
