use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 题型
///
/// 后端有时返回简写 `SINGLE` / `MULTIPLE`，未知题型原样保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::Other(raw) => raw,
        }
    }

    /// 展示用标签
    pub fn label(&self) -> &str {
        match self {
            QuestionType::SingleChoice => "Single Choice",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
            QuestionType::Other(raw) if raw.trim().is_empty() => "Unknown",
            QuestionType::Other(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "🔘",
            QuestionType::MultipleChoice => "☑️",
            QuestionType::TrueFalse => "🔀",
            QuestionType::Other(_) => "❔",
        }
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType::Other(String::new())
    }
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SINGLE_CHOICE" | "SINGLE" => QuestionType::SingleChoice,
            "MULTIPLE_CHOICE" | "MULTIPLE" => QuestionType::MultipleChoice,
            "TRUE_FALSE" => QuestionType::TrueFalse,
            _ => QuestionType::Other(raw),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 正确答案：单个字符串或字符串集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

impl CorrectAnswer {
    /// 判断某个选项是否为正确答案
    pub fn is_correct(&self, option: &str) -> bool {
        match self {
            CorrectAnswer::One(answer) => answer == option,
            CorrectAnswer::Many(answers) => answers.iter().any(|a| a == option),
        }
    }
}

/// 后端返回的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(rename = "question", alias = "text")]
    pub text: String,

    #[serde(rename = "type", default)]
    pub question_type: QuestionType,

    #[serde(
        default,
        deserialize_with = "deserialize_options",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub options: Vec<String>,

    #[serde(
        default,
        alias = "correctAnswers",
        deserialize_with = "deserialize_correct_answer",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<CorrectAnswer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer
            .as_ref()
            .is_some_and(|answer| answer.is_correct(option))
    }
}

/// 选项字母：0 → A, 1 → B ... 25 → Z，之后都是 `?`
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .unwrap_or('?')
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string().to_ascii_uppercase()),
        _ => None,
    }
}

// 选项可能是数组，也可能是 {"A": "...", "B": "..."} 形式的对象
fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|v| scalar_to_string(v).ok_or_else(|| D::Error::custom("选项必须是字符串")))
            .collect(),
        Value::Object(map) => map
            .values()
            .map(|v| scalar_to_string(v).ok_or_else(|| D::Error::custom("选项必须是字符串")))
            .collect(),
        other => Err(D::Error::custom(format!("无法识别的选项格式: {}", other))),
    }
}

fn deserialize_correct_answer<'de, D>(deserializer: D) -> Result<Option<CorrectAnswer>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let many = |values: Vec<&Value>| -> Result<Option<CorrectAnswer>, D::Error> {
        values
            .into_iter()
            .map(|v| scalar_to_string(v).ok_or_else(|| D::Error::custom("答案必须是字符串")))
            .collect::<Result<Vec<_>, _>>()
            .map(|answers| Some(CorrectAnswer::Many(answers)))
    };

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => many(items.iter().collect()),
        Value::Object(map) => many(map.values().collect()),
        scalar => Ok(scalar_to_string(&scalar).map(CorrectAnswer::One)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_answer_marks_only_that_option() {
        let q: QuizQuestion = serde_json::from_value(json!({
            "question": "Pick one",
            "type": "SINGLE_CHOICE",
            "options": ["A", "B", "C"],
            "correctAnswer": "B"
        }))
        .unwrap();

        let marks: Vec<bool> = q.options.iter().map(|o| q.is_correct(o)).collect();
        assert_eq!(marks, vec![false, true, false]);
    }

    #[test]
    fn answer_set_marks_every_member() {
        let q: QuizQuestion = serde_json::from_value(json!({
            "text": "Pick many",
            "type": "MULTIPLE_CHOICE",
            "options": ["A", "B", "C"],
            "correctAnswer": ["A", "C"]
        }))
        .unwrap();

        let marks: Vec<bool> = q.options.iter().map(|o| q.is_correct(o)).collect();
        assert_eq!(marks, vec![true, false, true]);
    }

    #[test]
    fn accepts_backend_field_names() {
        let q: QuizQuestion = serde_json::from_value(json!({
            "question": "The sky is blue",
            "type": "TRUE_FALSE",
            "options": ["TRUE", "FALSE"],
            "correctAnswers": ["TRUE"]
        }))
        .unwrap();

        assert_eq!(q.question_type, QuestionType::TrueFalse);
        assert!(q.is_correct("TRUE"));
        assert!(!q.is_correct("FALSE"));
    }

    #[test]
    fn options_object_is_flattened() {
        let q: QuizQuestion = serde_json::from_value(json!({
            "question": "Q",
            "type": "SINGLE",
            "options": {"A": "first", "B": "second"},
            "correctAnswers": {"0": "first"}
        }))
        .unwrap();

        assert_eq!(q.question_type, QuestionType::SingleChoice);
        assert_eq!(q.options, vec!["first", "second"]);
        assert!(q.is_correct("first"));
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let q: QuizQuestion = serde_json::from_value(json!({"question": "Open"})).unwrap();
        assert!(q.options.is_empty());
        assert!(q.correct_answer.is_none());
        assert!(!q.is_correct("anything"));
        assert_eq!(q.question_type, QuestionType::Other(String::new()));
        assert_eq!(q.question_type.label(), "Unknown");
    }

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let kind = QuestionType::from("ESSAY".to_string());
        assert_eq!(kind.label(), "ESSAY");
        assert_eq!(String::from(kind), "ESSAY");
    }

    #[test]
    fn letters_follow_position() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(2), 'C');
        assert_eq!(option_letter(25), 'Z');
        assert_eq!(option_letter(26), '?');
        assert_eq!(option_letter(100), '?');
        assert_eq!(option_letter(usize::MAX), '?');
    }
}
