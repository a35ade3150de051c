//! 生成参数面板

use crate::error::ValidationError;
use crate::models::{CountControl, CountKind, Difficulty, GenerateRequest, GenerationSettings};

/// 参数面板
///
/// 总题数只用于展示，由三种题型之和派生
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    settings: GenerationSettings,
    control: CountControl,
}

impl SettingsPanel {
    pub fn new(settings: GenerationSettings, control: CountControl) -> Self {
        Self { settings, control }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn control(&self) -> CountControl {
        self.control
    }

    pub fn total(&self) -> u32 {
        self.settings.total_questions()
    }

    pub fn set_count(&mut self, kind: CountKind, value: u32) -> Result<(), ValidationError> {
        self.settings.set_count(kind, value, self.control)
    }

    pub fn set_single(&mut self, value: u32) -> Result<(), ValidationError> {
        self.set_count(CountKind::SingleChoice, value)
    }

    pub fn set_multiple(&mut self, value: u32) -> Result<(), ValidationError> {
        self.set_count(CountKind::MultipleChoice, value)
    }

    pub fn set_true_false(&mut self, value: u32) -> Result<(), ValidationError> {
        self.set_count(CountKind::TrueFalse, value)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    /// 有请求进行中或总数为 0 时不可生成
    pub fn can_generate(&self, in_flight: bool) -> bool {
        !in_flight && self.total() > 0
    }

    pub fn payload(&self) -> GenerateRequest {
        self.settings.to_request()
    }
}
