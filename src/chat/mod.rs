mod message;
mod session;
mod stream;
mod transcript;

pub use message::{ChatMessage, Role};
pub use session::ChatSession;
pub use stream::{FragmentStream, StreamEvent};
pub use transcript::Transcript;
