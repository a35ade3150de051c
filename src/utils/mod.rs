pub mod logging;

pub use logging::{log_quiz_summary, log_startup, truncate_text};
