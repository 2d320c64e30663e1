//! # lsb_frame 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：带长度前缀的帧被逐位写入
//! 每个像素 R、G、B 通道的最低有效位，Alpha 通道从不改动。
//!
//! 核心编解码 (`layout`、`frame`、`steganography`) 只操作显式传入的像素缓冲区，
//! 不依赖任何图像文件或全局状态；`carrier`、`cli`、`handler` 是围绕它的薄 I/O 外壳。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod layout;
pub mod logging;
pub mod steganography;

pub use error::StegoError;
pub use layout::{BitLocation, CarrierLayout, Channel};
pub use steganography::{EmbedReport, capacity, decode, encode, read_bits, write_bits};
