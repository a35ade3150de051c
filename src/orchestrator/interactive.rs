//! 交互模式
//!
//! 每行一条命令，对应页面上的一个操作

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::clients::QuizBackend;
use crate::models::{format_file_size, CountKind, Difficulty};
use crate::orchestrator::session::Session;
use crate::utils::truncate_text;

pub const HELP: &str = "\
命令:
  select <路径>        选择文件 (PDF / DOCX / TXT，≤ 10MB)
  remove               移除文件
  upload               上传文件
  single <n>           单选题数量
  multiple <n>         多选题数量
  truefalse <n>        判断题数量
  level <easy|medium|hard>
  status               查看当前状态
  generate             生成测验
  show                 显示题目
  copy <序号>          复制第 n 题
  save <路径>          导出题目
  help                 帮助
  quit                 退出
";

/// 交互命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Remove,
    Upload,
    Count(CountKind, u32),
    Level(Difficulty),
    Status,
    Generate,
    Show,
    /// 从 1 开始的题号
    Copy(usize),
    Save(PathBuf),
    Help,
    Quit,
}

/// 解析一行输入，空行返回 `Ok(None)`
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    let require_arg = |what: &str| {
        if arg.is_empty() {
            Err(format!("缺少参数: {}", what))
        } else {
            Ok(arg)
        }
    };
    let number = |what: &str| -> Result<u32, String> {
        require_arg(what)?
            .parse::<u32>()
            .map_err(|_| format!("{} 必须是非负整数", what))
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "select" | "open" => Command::Select(PathBuf::from(require_arg("路径")?)),
        "remove" => Command::Remove,
        "upload" => Command::Upload,
        "single" => Command::Count(CountKind::SingleChoice, number("数量")?),
        "multiple" => Command::Count(CountKind::MultipleChoice, number("数量")?),
        "truefalse" | "tf" => Command::Count(CountKind::TrueFalse, number("数量")?),
        "level" => Command::Level(require_arg("难度")?.parse::<Difficulty>().map_err(|e| format!("{}", e))?),
        "status" => Command::Status,
        "generate" => Command::Generate,
        "show" => Command::Show,
        "copy" => {
            let n = number("题号")? as usize;
            if n == 0 {
                return Err("题号从 1 开始".to_string());
            }
            Command::Copy(n)
        }
        "save" => Command::Save(PathBuf::from(require_arg("路径")?)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("未知命令: {}，输入 help 查看帮助", other)),
    };

    Ok(Some(command))
}

/// 状态摘要
pub fn status_text<B: QuizBackend>(session: &Session<B>) -> String {
    let widget = session.upload_widget();
    let file = match widget.file() {
        Some(f) => format!(
            "{} ({}){}",
            truncate_text(&f.name, 40),
            format_file_size(f.size),
            if widget.is_uploaded() { " ✓ 已上传" } else { "" }
        ),
        None => "无".to_string(),
    };

    let generate = if session.can_generate() { "可用" } else { "不可用" };

    format!(
        "阶段: {}\n文件: {}\n参数: {}\n生成: {}\n题目: {} 道\n",
        session.phase(),
        file,
        session.settings().settings(),
        generate,
        session.questions().len()
    )
}

/// 执行单条命令，返回 `false` 表示退出
pub async fn execute<B, W>(session: &mut Session<B>, command: Command, out: &mut W) -> std::io::Result<bool>
where
    B: QuizBackend,
    W: Write,
{
    debug!("执行命令: {:?}", command);

    // 错误已转为提示，这里只关心是否继续
    match command {
        Command::Select(path) => {
            let _ = session.select_path(&path).await;
        }
        Command::Remove => session.remove_file(),
        Command::Upload => {
            let _ = session.upload().await;
        }
        Command::Count(kind, value) => {
            if session.set_count(kind, value).is_ok() {
                writeln!(out, "共 {} 题", session.settings().total())?;
            }
        }
        Command::Level(level) => session.set_difficulty(level),
        Command::Status => write!(out, "{}", status_text(session))?,
        Command::Generate => {
            if session.generate().await.is_ok() {
                write!(out, "{}", session.render(Instant::now()))?;
            }
        }
        Command::Show => write!(out, "{}", session.render(Instant::now()))?,
        Command::Copy(n) => {
            let _ = session.copy(n - 1, Instant::now());
        }
        Command::Save(path) => {
            if let Err(e) = session.export(&path).await {
                writeln!(out, "❌ {}", e.user_message())?;
            }
        }
        Command::Help => write!(out, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }

    for notification in session.drain_notifications() {
        writeln!(out, "{}", notification)?;
    }

    Ok(true)
}

/// 交互循环，读到 EOF 或 quit 时结束
pub async fn run<B, R, W>(session: &mut Session<B>, input: R, out: &mut W) -> std::io::Result<()>
where
    B: QuizBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "输入 help 查看可用命令")?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Some(command)) => {
                if !execute(session, command, out).await? {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => writeln!(out, "❌ {}", message)?,
        }
    }

    Ok(())
}
