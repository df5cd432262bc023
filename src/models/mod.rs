pub mod chat;
pub mod correction;
pub mod segment;

pub use chat::{ChatMessage, ChatRole};
pub use correction::{Category, Correction, CorrectionResponse, Scores};
pub use segment::Segment;
