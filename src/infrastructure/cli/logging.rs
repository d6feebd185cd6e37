//! 日志初始化

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 根据 -v 次数选择过滤规则
///
/// 优先级：RUST_LOG > -v > 配置中的 log_level
pub fn log_filter(verbose: u8, configured_level: &str, rust_log: Option<&str>) -> String {
    if let Some(filter) = rust_log {
        return filter.to_string();
    }

    match verbose {
        0 => configured_level.to_string(),
        1 => "warn,ai_voice=info".to_string(),
        2 => "info,ai_voice=debug".to_string(),
        _ => "debug,ai_voice=trace".to_string(),
    }
}

/// 初始化 tracing subscriber，日志写到 stderr
pub fn init_tracing(verbose: u8, json: bool, configured_level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let base_filter = log_filter(verbose, configured_level, rust_log.as_deref());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}
