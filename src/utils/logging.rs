/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::models::{GenerationSettings, QuizQuestion, QuestionType};
use tracing::info;

/// 导出文件的头部
///
/// # 参数
/// - `settings`: 本次生成使用的参数
pub fn export_header(settings: &GenerationSettings) -> String {
    format!(
        "{}\n测验导出 - {}\n{}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        settings,
        "=".repeat(60)
    )
}

/// 记录程序启动信息
///
/// # 参数
/// - `api_base_url`: 后端地址
pub fn log_startup(api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档生成测验");
    info!("🌐 后端地址: {}", api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录生成结果统计
///
/// # 参数
/// - `questions`: 生成的题目
pub fn log_quiz_summary(questions: &[QuizQuestion]) {
    let count = |kind: QuestionType| questions.iter().filter(|q| q.question_type == kind).count();

    info!("\n{}", "─".repeat(60));
    info!("📊 共 {} 道题", questions.len());
    info!(
        "单选 {} | 多选 {} | 判断 {}",
        count(QuestionType::SingleChoice),
        count(QuestionType::MultipleChoice),
        count(QuestionType::TrueFalse)
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
