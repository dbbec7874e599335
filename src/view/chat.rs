use super::{CHAT_APOLOGY, Outcome};
use crate::chat::{ChatSession, Transcript};
use crate::generation::GenerationClient;
use std::future::Future;
use tracing::{error, info};

pub const CANCELLED_MARKER: &str = "(中断しました)";

pub struct ChatForm {
    session: ChatSession,
    loading: bool,
}

impl ChatForm {
    pub fn new(client: &GenerationClient) -> Self {
        Self {
            session: client.create_chat_session(),
            loading: false,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_send(&self, text: &str) -> bool {
        !self.is_loading() && !text.trim().is_empty()
    }

    pub fn reset(&mut self, client: &GenerationClient, transcript: &mut Transcript) {
        self.session = client.create_chat_session();
        self.loading = false;
        *transcript = Transcript::with_greeting(crate::prompt::CHAT_GREETING);
    }

    pub async fn send(
        &mut self,
        client: &GenerationClient,
        transcript: &mut Transcript,
        text: &str,
        mut on_fragment: impl FnMut(&str),
        cancel: impl Future<Output = ()>,
    ) -> Outcome {
        if !self.can_send(text) {
            return Outcome::Skipped;
        }
        self.loading = true;
        transcript.push_user(text);
        let turn = transcript.begin_turn();
        tokio::pin!(cancel);

        let opened = tokio::select! {
            biased;
            _ = &mut cancel => None,
            result = client.send_chat_message(&self.session, text) => Some(result),
        };
        let mut stream = match opened {
            None => {
                transcript.cancel(turn, CANCELLED_MARKER);
                self.loading = false;
                return Outcome::Cancelled;
            }
            Some(Err(_)) => {
                transcript.fail(turn, CHAT_APOLOGY);
                self.loading = false;
                return Outcome::Failed;
            }
            Some(Ok(stream)) => stream,
        };

        let outcome = loop {
            let next = tokio::select! {
                biased;
                _ = &mut cancel => {
                    stream.cancel();
                    transcript.cancel(turn, CANCELLED_MARKER);
                    break Outcome::Cancelled;
                }
                next = stream.next_fragment() => next,
            };

            match next {
                Some(Ok(fragment)) => {
                    if transcript.push_fragment(turn, &fragment) {
                        on_fragment(&fragment);
                    }
                }
                Some(Err(e)) => {
                    error!("Chat stream failed: {}", e);
                    transcript.fail(turn, CHAT_APOLOGY);
                    break Outcome::Failed;
                }
                None => {
                    if let Some(reply) = transcript.complete(turn) {
                        self.session.record_turn(text, reply);
                    }
                    info!(
                        "Chat turn completed (session: {}, history: {} messages)",
                        self.session.id(),
                        self.session.history().len()
                    );
                    break Outcome::Succeeded;
                }
            }
        };

        self.loading = false;
        outcome
    }
}
