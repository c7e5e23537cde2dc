use std::{env, path::PathBuf};

use npsqa_core::config::Config;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    npsqa_cli::init_tracing(&settings.log.level);

    let mut reset = false;
    let mut skip_builtin = false;
    let mut data_dir = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--reset" | "-r" => reset = true,
            "--skip-builtin" => skip_builtin = true,
            _ if !arg.starts_with('-') => data_dir = Some(PathBuf::from(arg)),
            other => {
                eprintln!("Usage: npsqa-ingest [dir] [--reset] [--skip-builtin] (unknown flag {other})");
                std::process::exit(1);
            }
        }
    }
    let data_dir = data_dir.or_else(|| settings.knowledge_base.txt_dir.as_ref().map(PathBuf::from));

    println!("NPS knowledge base ingest\n=========================");
    if let Some(dir) = &data_dir {
        println!("Data directory: {}", dir.display());
    }
    let docs = npsqa_cli::collect_documents(data_dir.as_deref(), skip_builtin)?;
    info!(documents = docs.len(), reset, "starting ingest");

    let store = npsqa_vector::open_from_settings(&settings)?;
    let total = npsqa_cli::ingest(&store, &docs, reset)?;
    println!("Added {} documents; table '{}' now holds {}", docs.len(), store.table_name(), total);
    Ok(())
}
