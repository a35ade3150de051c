use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 难度，原样转发给后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty {
                value: s.to_string(),
            }),
        }
    }
}

/// 题量输入控件
///
/// 滑块 0-10，数字输入框 0-20
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountControl {
    Slider,
    #[default]
    NumericInput,
}

impl CountControl {
    pub fn max(self) -> u32 {
        match self {
            CountControl::Slider => 10,
            CountControl::NumericInput => 20,
        }
    }

    pub fn check(self, value: u32) -> Result<u32, ValidationError> {
        if value > self.max() {
            Err(ValidationError::CountOutOfRange {
                value,
                max: self.max(),
            })
        } else {
            Ok(value)
        }
    }
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
}

/// 生成参数
///
/// 总题数只由三种题型之和派生，不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub single_choice: u32,
    pub multiple_choice: u32,
    pub true_false: u32,
    pub difficulty: Difficulty,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            single_choice: 2,
            multiple_choice: 2,
            true_false: 1,
            difficulty: Difficulty::Medium,
        }
    }
}

impl GenerationSettings {
    pub fn total_questions(&self) -> u32 {
        self.single_choice
            .saturating_add(self.multiple_choice)
            .saturating_add(self.true_false)
    }

    /// 检查三种题型的数量都在控件范围内
    pub fn validate(&self, control: CountControl) -> Result<(), ValidationError> {
        control.check(self.single_choice)?;
        control.check(self.multiple_choice)?;
        control.check(self.true_false)?;
        Ok(())
    }

    pub fn count(&self, kind: CountKind) -> u32 {
        match kind {
            CountKind::SingleChoice => self.single_choice,
            CountKind::MultipleChoice => self.multiple_choice,
            CountKind::TrueFalse => self.true_false,
        }
    }

    /// 设置某一题型的数量，超出控件范围时不修改
    pub fn set_count(
        &mut self,
        kind: CountKind,
        value: u32,
        control: CountControl,
    ) -> Result<(), ValidationError> {
        let value = control.check(value)?;
        match kind {
            CountKind::SingleChoice => self.single_choice = value,
            CountKind::MultipleChoice => self.multiple_choice = value,
            CountKind::TrueFalse => self.true_false = value,
        }
        Ok(())
    }

    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            total_questions: self.total_questions(),
            single_choice: self.single_choice,
            multiple_choice: self.multiple_choice,
            true_false: self.true_false,
            level: self.difficulty,
        }
    }
}

impl fmt::Display for GenerationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "单选 {} | 多选 {} | 判断 {} | 共 {} 题 | 难度 {}",
            self.single_choice,
            self.multiple_choice,
            self.true_false,
            self.total_questions(),
            self.difficulty
        )
    }
}

/// `POST /generate` 请求体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub total_questions: u32,
    pub single_choice: u32,
    pub multiple_choice: u32,
    pub true_false: u32,
    pub level: Difficulty,
}
