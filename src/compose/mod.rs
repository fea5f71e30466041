//! Draft composition: length guard, editable session and submission flow

mod flow;
mod guard;
mod session;

pub use flow::{FlowState, Outcome, SubmissionFlow, Trigger};
pub use guard::{MAX_POST_CHARS, on_text_changed};
pub use session::DraftSession;
