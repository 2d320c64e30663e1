//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，把带长度前缀的数据藏进无损图像 (如 PNG, BMP) 的 RGB 通道。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具。每个像素的 R、G、B 通道各承载 1 bit，数据以 4 字节大端序长度为前缀，Alpha 通道保持不变。"
)]
pub struct Cli {
    /// 输出更详细的日志 (可重复: -v, -vv, -vvv)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// 只输出错误日志。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏文本文件内容或一段消息。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 报告图像最多能隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["text", "message"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行给出要隐藏的消息。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 默认为输入图像同目录下的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复数据后，保存内容的输出路径。
    /// 默认为图像同目录下的 `recovered_<名称>.txt`。
    #[arg(short, long, conflicts_with = "stdout")]
    pub text: Option<PathBuf>,

    /// 把恢复的内容按 UTF-8 (无效序列替换为 U+FFFD) 打印到标准输出，而不是写入文件。
    #[arg(long)]
    pub stdout: bool,

    /// 目标文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
