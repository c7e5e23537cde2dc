//! npsqa-vector
//!
//! LanceDB-backed knowledge-base store. Passages are embedded once on
//! insert; questions are embedded at search time and matched by cosine
//! distance.
pub mod schema;
pub mod store;
pub mod table;
pub mod writer;

pub use store::LanceVectorStore;

use anyhow::Result;
use npsqa_core::config::{expand_path, Settings};

/// Open the configured store with the configured embedder.
pub fn open_from_settings(settings: &Settings) -> Result<LanceVectorStore> {
    let embedder = npsqa_embed::get_default_embedder(&settings.embedding)?;
    let db_dir = expand_path(&settings.vector.db_dir);
    LanceVectorStore::open(&db_dir, &settings.vector.table, embedder)
}
