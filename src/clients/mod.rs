#[cfg(test)]
pub mod mock;
pub mod quiz_client;

pub use quiz_client::{HttpQuizClient, QuizBackend};
