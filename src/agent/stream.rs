//! Producer/consumer hand-off for the streamed answer.
//!
//! The orchestrator is the sole producer, the caller the sole consumer.
//! A bounded channel carries text fragments followed by exactly one
//! terminal marker. If the consumer stops reading, the producer runs to
//! completion and its sends are silently discarded.

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::HolocronError;

/// One item of a streamed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// A text fragment, in arrival order.
    Fragment(String),
    /// Generation finished; no further events follow.
    Done,
    /// Generation failed mid-turn; no further events follow.
    Failed(String),
}

/// The caller's end of the answer channel.
pub type AnswerStream = ReceiverStream<AnswerEvent>;

/// The orchestrator's end of the answer channel.
pub(crate) struct AnswerSink {
    tx: mpsc::Sender<AnswerEvent>,
}

impl AnswerSink {
    pub async fn fragment(&self, text: String) {
        let _ = self.tx.send(AnswerEvent::Fragment(text)).await;
    }

    pub async fn done(&self) {
        let _ = self.tx.send(AnswerEvent::Done).await;
    }

    pub async fn failed(&self, message: String) {
        let _ = self.tx.send(AnswerEvent::Failed(message)).await;
    }
}

/// Build a bounded answer channel.
pub(crate) fn answer_channel(capacity: usize) -> (AnswerSink, AnswerStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (AnswerSink { tx }, ReceiverStream::new(rx))
}

/// Drain a stream into the full answer text. Returns the concatenated
/// fragments on `Done`, the failure on `Failed`, and an error if the
/// stream ends without a terminal marker.
pub async fn collect_text(stream: &mut AnswerStream) -> Result<String, HolocronError> {
    let mut answer = String::new();
    while let Some(event) = stream.next().await {
        match event {
            AnswerEvent::Fragment(text) => answer.push_str(&text),
            AnswerEvent::Done => return Ok(answer),
            AnswerEvent::Failed(message) => return Err(HolocronError::Orchestrator(message)),
        }
    }
    Err(HolocronError::Orchestrator(
        "answer stream ended without a completion signal".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fragments_then_done() {
        let (sink, mut stream) = answer_channel(8);
        sink.fragment("Hello ".to_string()).await;
        sink.fragment("there".to_string()).await;
        sink.done().await;
        drop(sink);

        assert_eq!(collect_text(&mut stream).await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn test_failed_surfaces_as_error() {
        let (sink, mut stream) = answer_channel(8);
        sink.fragment("partial".to_string()).await;
        sink.failed("model unreachable".to_string()).await;
        drop(sink);

        let err = collect_text(&mut stream).await.unwrap_err();
        assert!(err.to_string().contains("model unreachable"));
    }

    #[tokio::test]
    async fn test_dropped_consumer_does_not_panic_producer() {
        let (sink, stream) = answer_channel(1);
        drop(stream);
        // sends into a closed channel are discarded
        sink.fragment("ignored".to_string()).await;
        sink.done().await;
    }
}
