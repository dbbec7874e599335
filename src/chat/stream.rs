use crate::gemini::GenerationError;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

const STREAM_BUFFER: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    TextDelta(String),
    Done,
    Error(String),
}

pub struct FragmentStream {
    rx: mpsc::Receiver<StreamEvent>,
    abort_handle: Option<AbortHandle>,
    finished: bool,
    cancelled: bool,
}

impl FragmentStream {
    pub fn new(rx: mpsc::Receiver<StreamEvent>, abort_handle: Option<AbortHandle>) -> Self {
        Self {
            rx,
            abort_handle,
            finished: false,
            cancelled: false,
        }
    }

    pub fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<StreamEvent>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let handle = tokio::spawn(producer(tx));
        Self::new(rx, Some(handle.abort_handle()))
    }

    pub async fn next_fragment(&mut self) -> Option<Result<String, GenerationError>> {
        if self.is_finished() {
            return None;
        }
        match self.rx.recv().await {
            Some(StreamEvent::TextDelta(text)) => Some(Ok(text)),
            Some(StreamEvent::Done) => {
                self.finished = true;
                None
            }
            Some(StreamEvent::Error(e)) => {
                self.finished = true;
                Some(Err(GenerationError::Stream(e)))
            }
            None => {
                self.finished = true;
                if self.cancelled {
                    None
                } else {
                    Some(Err(GenerationError::Stream(
                        "stream closed before the turn completed".to_string(),
                    )))
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.finished = true;
        self.rx.close();
        if let Some(handle) = self.abort_handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for FragmentStream {
    fn drop(&mut self) {
        if let Some(handle) = self.abort_handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
impl FragmentStream {
    pub fn from_events(events: Vec<StreamEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            let _ = tx.try_send(event);
        }
        Self::new(rx, None)
    }
}
