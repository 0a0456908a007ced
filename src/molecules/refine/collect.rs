use std::time::Duration;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::generator::{ContentGenerator, RefinementRequest};
use crate::types::{DraftError, DraftResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub content: String,
    pub chunks: usize,
}

/// Runs the generator and concatenates its chunks in delivery order, handing
/// each one to `on_chunk` as soon as it arrives.
///
/// Both the `generate` call and the drain are bounded by `cancel` and by
/// `timeout` when one is given.
pub async fn stream_refinement<F>(
    generator: &dyn ContentGenerator,
    request: RefinementRequest,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    mut on_chunk: F,
) -> DraftResult<Collected>
where
    F: FnMut(&str) + Send,
{
    let drain = async {
        let mut stream = generator.generate(request).await?;
        let mut collected = Collected::default();

        while let Some(item) = stream.next().await {
            let chunk = item?;
            if chunk.is_empty() {
                continue;
            }
            on_chunk(&chunk);
            collected.content.push_str(&chunk);
            collected.chunks += 1;
        }

        Ok::<Collected, DraftError>(collected)
    };

    let bounded = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, drain).await {
                Ok(result) => result,
                Err(_) => Err(DraftError::TimedOut(limit)),
            },
            None => drain.await,
        }
    };

    tokio::select! {
        _ = cancel.cancelled() => Err(DraftError::Cancelled),
        result = bounded => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecules::refine::testing::ScriptedGenerator;
    use crate::molecules::refine::build_refinement_request;

    fn request() -> RefinementRequest {
        build_refinement_request("Hello", None, "Make it formal")
    }

    #[tokio::test]
    async fn test_chunks_forwarded_in_order() {
        let generator = ScriptedGenerator::chunks(&["Gree", "", "tings"]);
        let mut seen = Vec::new();

        let collected = stream_refinement(
            &generator,
            request(),
            &CancellationToken::new(),
            None,
            |chunk| seen.push(chunk.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(collected.content, "Greetings");
        assert_eq!(collected.chunks, 2);
        assert_eq!(seen, vec!["Gree", "tings"]);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let generator = ScriptedGenerator::fails_after(&["partial"], "model overloaded");
        let err = stream_refinement(&generator, request(), &CancellationToken::new(), None, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, DraftError::Generator(msg) if msg == "model overloaded"));
    }

    #[tokio::test]
    async fn test_cancel_stops_hanging_generator() {
        let generator = ScriptedGenerator::hangs_after(&["start"]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = stream_refinement(&generator, request(), &cancel, None, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, DraftError::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_stops_hanging_generator() {
        let generator = ScriptedGenerator::hangs_after(&[]);
        let err = stream_refinement(
            &generator,
            request(),
            &CancellationToken::new(),
            Some(Duration::from_millis(20)),
            |_| {},
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DraftError::TimedOut(_)));
    }
}
