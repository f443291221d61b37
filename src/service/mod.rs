pub mod conversation;
pub mod diagram;
pub mod llm;
pub mod optimization;
pub mod response;

pub use conversation::ConversationService;
pub use diagram::DiagramGenerationService;
pub use llm::{GeminiClient, TextCompletion};
pub use optimization::OptimizationService;
