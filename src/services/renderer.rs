//! 测验结果渲染 - 纯函数，不发起网络请求

use serde_json::Value;
use std::fmt::Write;
use std::time::Instant;
use tracing::warn;

use crate::models::{option_letter, QuizQuestion};
use crate::services::clipboard::CopyIndicator;
use crate::services::normalizer::normalize;

/// 每个选项是否为正确答案
pub fn option_marks(question: &QuizQuestion) -> Vec<bool> {
    question
        .options
        .iter()
        .map(|option| question.is_correct(option))
        .collect()
}

/// 渲染单道题
pub fn render_question(question: &QuizQuestion, index: usize, copied: bool) -> String {
    let mut out = String::new();
    let copy_marker = if copied { "  ✅ 已复制" } else { "" };

    let _ = writeln!(
        out,
        "{}. {} [{}]{}",
        index + 1,
        question.question_type.icon(),
        question.question_type.label(),
        copy_marker
    );
    let _ = writeln!(out, "   {}", question.text);

    for (i, (option, correct)) in question.options.iter().zip(option_marks(question)).enumerate() {
        if correct {
            let _ = writeln!(out, "   ✓ {}. {}", option_letter(i), option);
        } else {
            let _ = writeln!(out, "     {}. {}", option_letter(i), option);
        }
    }

    if let Some(explanation) = &question.explanation {
        let _ = writeln!(out, "   💡 {}", explanation);
    }

    out
}

/// 渲染题目列表
pub fn render_questions(questions: &[QuizQuestion], indicator: &CopyIndicator, now: Instant) -> String {
    let mut out = format!("📝 Quiz ({} 道题)\n\n", questions.len());
    for (index, question) in questions.iter().enumerate() {
        out.push_str(&render_question(question, index, indicator.is_copied(index, now)));
        out.push('\n');
    }
    out
}

/// 空状态：没有可展示的题目时输出原始数据
pub fn render_empty(raw: &Value) -> String {
    let dump = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!("⚠️ 没有可展示的题目，原始响应如下:\n{}\n", dump)
}

/// 渲染任意 JSON 响应
pub fn render_value(raw: &Value) -> String {
    match normalize(raw) {
        Ok(normalized) if !normalized.is_empty() => {
            render_questions(&normalized.questions, &CopyIndicator::new(), Instant::now())
        }
        Ok(_) => render_empty(raw),
        Err(e) => {
            warn!("⚠️ 响应解析失败: {}", e);
            render_empty(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorrectAnswer, QuestionType};
    use serde_json::json;

    fn multiple() -> QuizQuestion {
        QuizQuestion {
            text: "Primes?".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec!["2".to_string(), "4".to_string(), "5".to_string()],
            correct_answer: Some(CorrectAnswer::Many(vec!["2".to_string(), "5".to_string()])),
            explanation: Some("4 = 2 * 2".to_string()),
        }
    }

    #[test]
    fn marks_follow_correct_answer() {
        assert_eq!(option_marks(&multiple()), vec![true, false, true]);

        let mut single = multiple();
        single.correct_answer = Some(CorrectAnswer::One("4".to_string()));
        assert_eq!(option_marks(&single), vec![false, true, false]);

        single.correct_answer = None;
        assert_eq!(option_marks(&single), vec![false, false, false]);
    }

    #[test]
    fn renders_label_options_and_explanation() {
        let text = render_question(&multiple(), 0, false);
        assert!(text.starts_with("1. ☑️ [Multiple Choice]"));
        assert!(text.contains("   ✓ A. 2"));
        assert!(text.contains("     B. 4"));
        assert!(text.contains("   ✓ C. 5"));
        assert!(text.contains("💡 4 = 2 * 2"));
        assert!(!text.contains("已复制"));
    }

    #[test]
    fn missing_type_gets_readable_label() {
        let question: QuizQuestion =
            serde_json::from_value(json!({"question": "Open", "options": ["a"]})).unwrap();
        let text = render_question(&question, 0, false);
        assert!(text.starts_with("1. ❔ [Unknown]"));
        assert!(!text.contains("[]"));
    }

    #[test]
    fn copied_marker_follows_indicator() {
        let now = Instant::now();
        let mut indicator = CopyIndicator::new();
        indicator.mark(1, now);

        let questions = vec![multiple(), multiple()];
        let text = render_questions(&questions, &indicator, now);
        assert!(text.starts_with("📝 Quiz (2 道题)"));
        assert_eq!(text.matches("已复制").count(), 1);
        assert!(text.contains("2. ☑️ [Multiple Choice]  ✅ 已复制"));
    }

    #[test]
    fn empty_response_shows_raw_json() {
        let text = render_value(&json!({"message": "nothing"}));
        assert!(text.contains("没有可展示的题目"));
        assert!(text.contains("\"message\": \"nothing\""));

        assert!(render_value(&json!([])).contains("没有可展示的题目"));
    }

    #[test]
    fn renders_in_received_order() {
        let raw = json!({"data": [
            {"question": "first", "type": "TRUE_FALSE"},
            {"question": "second", "type": "TRUE_FALSE"}
        ]});
        let text = render_value(&raw);
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        assert!(first < second);
    }
}
