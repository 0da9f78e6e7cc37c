//! Create a stub embedder and generate an embedding.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    use admatch::{Embedder, StubEmbedder};

    let embedder = StubEmbedder::new(384);
    let embedding = embedder.embed("hello world").await?;
    println!("dim={}", embedding.len());
    Ok(())
}
