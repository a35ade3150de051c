pub mod clipboard;
pub mod normalizer;
pub mod renderer;

pub use clipboard::{clipboard_text, Clipboard, ClipboardTarget, CopyIndicator};
pub use normalizer::{normalize, Normalized, ResponseShape};
pub use renderer::{option_marks, render_questions, render_value};
