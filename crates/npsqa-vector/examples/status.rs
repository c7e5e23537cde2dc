use npsqa_core::config::Config;
use npsqa_core::traits::DocumentStore;

fn main() -> anyhow::Result<()> {
    let settings = Config::load()?.settings()?;
    let store = npsqa_vector::open_from_settings(&settings)?;
    println!("{}: documents={}", store.table_name(), store.count()?);
    Ok(())
}
