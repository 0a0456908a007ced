//! In-memory generator for exercising refinement without a model.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use super::generator::{ChunkStream, ContentGenerator, RefinementRequest};
use crate::types::{DraftError, DraftResult};

#[derive(Debug, Clone)]
enum Ending {
    Finish,
    Fail(String),
    Hang,
}

/// Replays a fixed list of chunks, then finishes, fails or never finishes.
/// Every request it receives is kept for inspection.
#[derive(Debug)]
pub struct ScriptedGenerator {
    chunks: Vec<String>,
    ending: Ending,
    requests: Mutex<Vec<RefinementRequest>>,
}

impl ScriptedGenerator {
    fn new(chunks: &[&str], ending: Ending) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            ending,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn chunks(chunks: &[&str]) -> Self {
        Self::new(chunks, Ending::Finish)
    }

    pub fn empty() -> Self {
        Self::new(&[], Ending::Finish)
    }

    pub fn fails_after(chunks: &[&str], message: &str) -> Self {
        Self::new(chunks, Ending::Fail(message.to_string()))
    }

    pub fn hangs_after(chunks: &[&str]) -> Self {
        Self::new(chunks, Ending::Hang)
    }

    pub fn requests(&self) -> Vec<RefinementRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, request: RefinementRequest) -> DraftResult<ChunkStream> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let head = stream::iter(self.chunks.clone().into_iter().map(Ok::<String, DraftError>));

        let replay: ChunkStream = match &self.ending {
            Ending::Finish => Box::pin(head),
            Ending::Fail(message) => {
                let error = DraftError::Generator(message.clone());
                Box::pin(head.chain(stream::once(async move { Err(error) })))
            }
            Ending::Hang => Box::pin(head.chain(stream::pending())),
        };

        Ok(replay)
    }
}
