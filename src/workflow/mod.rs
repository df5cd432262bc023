pub mod essay_state;

pub use essay_state::{EssayState, RequestTicket, SubmissionOutcome};
