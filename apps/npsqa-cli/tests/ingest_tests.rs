use std::fs;

use npsqa_cli::{collect_documents, ingest};
use npsqa_core::traits::Retriever;
use npsqa_embed::{FakeEmbedder, BGE_M3_DIM};
use npsqa_vector::LanceVectorStore;
use tempfile::TempDir;

#[test]
fn collects_builtin_and_directory_documents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("faq.txt"), "First paragraph.\n\nSecond paragraph.").unwrap();

    let all = collect_documents(Some(dir.path()), false).unwrap();
    let builtin = collect_documents(None, false).unwrap();
    assert_eq!(all.len(), builtin.len() + 2);
    assert!(all.iter().any(|d| d.id == "faq:0"));

    let extra_only = collect_documents(Some(dir.path()), true).unwrap();
    assert_eq!(extra_only.len(), 2);
}

#[test]
fn reset_ingest_replaces_contents() {
    let db = TempDir::new().unwrap();
    let store = LanceVectorStore::open(db.path(), "nps_documents", Box::new(FakeEmbedder::new(BGE_M3_DIM))).unwrap();
    let docs = collect_documents(None, false).unwrap();

    assert_eq!(ingest(&store, &docs, false).unwrap(), docs.len());
    assert_eq!(ingest(&store, &docs, false).unwrap(), docs.len() * 2);
    assert_eq!(ingest(&store, &docs[..3], true).unwrap(), 3);
    assert!(!store.search("PRAN", 2).unwrap().is_empty());
}
