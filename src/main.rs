//! 数据库连通性探测工具
//!
//! 构造连接配置，打开客户端，列出目标数据库中的集合：
//! - 成功：打印集合名列表（成功前缀）
//! - 失败：打印错误信息（失败前缀）
//!
//! 两种情况下进程都以退出码 0 正常结束。

mod config;
mod error;
mod probe;
mod report;

use config::ProbeConfig;
use report::{OutputFormat, ProbeReport};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪（写到 stderr，stdout 只输出一行探测结果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let (format, report) = match ProbeConfig::from_env() {
        Ok(config) => {
            info!(
                uri = %config.redacted_uri(),
                database = %config.database,
                connect_timeout_ms = config.connect_timeout_ms,
                selection_timeout_ms = config.selection_timeout_ms,
                "starting probe"
            );
            let format = config.output_format;
            let database = config.database.clone();
            // 执行探测；任何错误都收敛为失败报告行
            let report = match probe::run(&config).await {
                Ok(outcome) => ProbeReport::success(database, outcome),
                Err(e) => {
                    warn!(error = %e, "probe failed");
                    ProbeReport::failure(Some(database), e.to_string())
                }
            };
            (format, report)
        }
        Err(e) => {
            warn!(error = %e, "configuration invalid, probe not attempted");
            // 配置失败时仍尽量尊重 PROBE_FORMAT，保证失败行可被机器解析
            let format = OutputFormat::from_env_lossy();
            (format, ProbeReport::failure(None, e.to_string()))
        }
    };

    // 唯一的一行标准输出；成功与失败路径都正常退出
    println!("{}", report.render(format));
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
