//! Load configuration from environment variables.

use anyhow::Result;

fn main() -> Result<()> {
    let config = admatch::Config::from_env()?;
    println!(
        "bind_addr={}, port={}, qdrant_url={}, collection={}",
        config.bind_addr, config.port, config.qdrant_url, config.collection_name
    );
    Ok(())
}
