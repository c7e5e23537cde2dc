use arrow_schema::{DataType, Field, Schema, TimeUnit};
use std::sync::Arc;

pub const EMBEDDING_DIM: i32 = 1024;

/// Row layout of the knowledge-base table.
pub fn build_documents_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("content", DataType::Utf8, false),
        Field::new("source", DataType::Utf8, false),
        Field::new("doc_index", DataType::Int64, false),
        Field::new("content_hash", DataType::Utf8, false),
        Field::new("added_at", DataType::Timestamp(TimeUnit::Millisecond, None), false),
        Field::new("vector", DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), EMBEDDING_DIM), true),
    ]))
}
