use npsqa_core::config::EmbeddingSettings;
use npsqa_embed::{get_default_embedder, FakeEmbedder, BGE_M3_DIM};
use npsqa_core::traits::Embedder;

fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

#[test]
fn fake_embedder_shapes_and_determinism() {
    let settings = EmbeddingSettings { use_fake: true, ..EmbeddingSettings::default() };
    let embedder = get_default_embedder(&settings).expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");

    assert_eq!(embs.len(), 2);
    assert_eq!(embs[0].len(), BGE_M3_DIM, "embedding dim is 1024");
    let norm: f32 = embs[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
    for (a, b) in embs[0].iter().zip(embs[1].iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn fake_embedder_prefers_shared_vocabulary() {
    let embedder = FakeEmbedder::new(BGE_M3_DIM);
    let texts = vec![
        "What are the NPS withdrawal rules?".to_string(),
        "NPS Withdrawal Rules at Age 60".to_string(),
        "Documents required for account opening".to_string(),
    ];
    let e = embedder.embed_batch(&texts).expect("embed");
    assert!(cosine(&e[0], &e[1]) > cosine(&e[0], &e[2]));
}

#[test]
fn missing_model_dir_is_an_error() {
    std::env::remove_var("APP_USE_FAKE_EMBEDDINGS");
    let settings = EmbeddingSettings { model_dir: "/nonexistent/bge-m3".into(), use_fake: false, max_len: 256 };
    if std::env::var("APP_MODEL_DIR").is_err() && std::env::var("MODEL_DIR").is_err() {
        assert!(get_default_embedder(&settings).is_err());
    }
}
