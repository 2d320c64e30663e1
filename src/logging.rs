//! # 日志模块
//!
//! 基于 `log` + `env_logger`。诊断信息写到 stderr，操作结果仍由处理函数打印到 stdout。

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// 根据 `-v` 出现的次数与 `--quiet` 计算日志级别。
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 初始化全局日志器，格式为 `[LEVEL] message`。
///
/// `RUST_LOG` 环境变量在命令行级别之后应用，可覆盖它。重复初始化会被忽略。
pub fn init_logging(level: LevelFilter) {
    let _ = Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbosity_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(7, false), LevelFilter::Trace);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
