pub mod question;
pub mod settings;
pub mod upload;

pub use question::{option_letter, CorrectAnswer, QuestionType, QuizQuestion};
pub use settings::{CountControl, CountKind, Difficulty, GenerateRequest, GenerationSettings};
pub use upload::{format_file_size, validate_file, DocumentKind, UploadedFile, MAX_UPLOAD_BYTES};
