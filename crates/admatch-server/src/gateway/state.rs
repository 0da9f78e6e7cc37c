use std::sync::Arc;

use admatch::{Embedder, Indexer, MatchPipeline, VectorStore};

#[derive(Clone)]
pub struct HandlerState<
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
> {
    pub pipeline: Arc<MatchPipeline<E, V>>,

    pub indexer: Arc<Indexer<E, V>>,
}

impl<E, V> HandlerState<E, V>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    pub fn new(pipeline: MatchPipeline<E, V>, indexer: Indexer<E, V>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            indexer: Arc::new(indexer),
        }
    }
}
