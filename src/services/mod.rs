pub mod chat_session;
pub mod correction_service;
pub mod ingest;
pub mod llm_service;

pub use chat_session::ChatSession;
pub use correction_service::CorrectionService;
pub use llm_service::LlmService;
