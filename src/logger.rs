//! 日志初始化
//!
//! 优先级：RUST_LOG 环境变量 > --verbose > 默认 info

use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅器
///
/// 重复调用时忽略（测试中可能多次初始化）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
