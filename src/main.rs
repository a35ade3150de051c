use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quizgen::config::Config;
use quizgen::models::{format_file_size, CountKind, Difficulty, UploadedFile};
use quizgen::orchestrator::interactive;
use quizgen::services::render_value;
use quizgen::utils::{log_quiz_summary, log_startup};
use quizgen::{logger, HttpQuizClient, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tokio::io::BufReader;

/// 上传文档，生成测验
#[derive(Parser, Debug)]
#[command(name = "quizgen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// 配置文件路径（默认 quizgen.toml）
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// 后端 API 根地址
    #[arg(long, value_name = "URL", global = true)]
    api: Option<String>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 只检查文件类型和大小
    Check { file: PathBuf },
    /// 上传文档
    Upload { file: PathBuf },
    /// 上传并生成测验
    Run(RunArgs),
    /// 渲染保存下来的 JSON 响应
    Render { json: PathBuf },
    /// 交互模式
    Interactive,
}

#[derive(Args, Debug)]
struct RunArgs {
    file: PathBuf,
    /// 单选题数量
    #[arg(long)]
    single: Option<u32>,
    /// 多选题数量
    #[arg(long)]
    multiple: Option<u32>,
    /// 判断题数量
    #[arg(long = "true-false")]
    true_false: Option<u32>,
    /// 难度：easy / medium / hard
    #[arg(long)]
    level: Option<Difficulty>,
    /// 导出到文件
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// 生成后复制第 n 题
    #[arg(long, value_name = "N")]
    copy: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 加载配置
    let mut config = Config::load(cli.config.as_deref())
        .await
        .context("加载配置失败")?;
    if let Some(api) = cli.api {
        config.api_base_url = api;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logger::init(config.verbose_logging);

    match cli.command {
        Command::Check { file } => {
            let file = UploadedFile::from_path(&file).await?;
            println!("✓ {} 可以上传 ({}, {})", file.name, file.mime_type, format_file_size(file.size));
        }
        Command::Render { json } => {
            let content = tokio::fs::read_to_string(&json)
                .await
                .with_context(|| format!("无法读取文件: {}", json.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("无法解析JSON: {}", json.display()))?;
            print!("{}", render_value(&value));
        }
        Command::Upload { file } => {
            log_startup(&config.api_base_url);
            let mut session = Session::new(HttpQuizClient::new(&config)?, &config);
            let result = async {
                session.select_path(&file).await?;
                session.upload().await
            }
            .await;
            print_notifications(&mut session);
            result?;
        }
        Command::Run(args) => run_once(&config, args).await?,
        Command::Interactive => {
            log_startup(&config.api_base_url);
            let mut session = Session::new(HttpQuizClient::new(&config)?, &config);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            interactive::run(&mut session, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}

/// 上传 → 生成 → 渲染
async fn run_once(config: &Config, args: RunArgs) -> Result<()> {
    log_startup(&config.api_base_url);
    let mut session = Session::new(HttpQuizClient::new(config)?, config);

    let counts = [
        (CountKind::SingleChoice, args.single),
        (CountKind::MultipleChoice, args.multiple),
        (CountKind::TrueFalse, args.true_false),
    ];
    for (kind, value) in counts {
        if let Some(value) = value {
            session.set_count(kind, value)?;
        }
    }
    if let Some(level) = args.level {
        session.set_difficulty(level);
    }

    let result = async {
        session.select_path(&args.file).await?;
        session.upload().await?;
        session.generate().await
    }
    .await;
    print_notifications(&mut session);
    result?;

    log_quiz_summary(session.questions());

    if let Some(n) = args.copy {
        if n == 0 {
            bail!("题号从 1 开始");
        }
        session.copy(n - 1, Instant::now())?;
    }

    print!("{}", session.render(Instant::now()));
    print_notifications(&mut session);

    let output = args.output.or_else(|| config.output_file.as_ref().map(PathBuf::from));
    if let Some(path) = output {
        session.export(&path).await?;
    }

    Ok(())
}

fn print_notifications(session: &mut Session<HttpQuizClient>) {
    for notification in session.drain_notifications() {
        eprintln!("{}", notification);
    }
}
