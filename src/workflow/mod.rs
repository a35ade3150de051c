pub mod settings_panel;
pub mod upload_widget;

pub use settings_panel::SettingsPanel;
pub use upload_widget::{UploadWidget, UPLOAD_FAILED_MESSAGE};
