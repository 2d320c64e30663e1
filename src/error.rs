//! # 核心错误类型
//!
//! 编解码核心的所有失败都以值的形式返回给直接调用者，不会出现部分写入。

/// 隐写编解码过程中可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StegoError {
    /// 帧所需的位数超过了缓冲区的载体容量，缓冲区未被修改。
    #[error(
        "message too long: frame needs {required_bits} bits but only {capacity_bits} are available (max payload {max_payload} bytes)"
    )]
    CapacityExceeded {
        required_bits: u64,
        capacity_bits: usize,
        max_payload: usize,
    },

    /// 解出的长度连同帧头超过了缓冲区容量：没有消息，或者数据已损坏。
    ///
    /// 缓冲区连 32 位帧头都容纳不下时，`length` 为 `None`。
    #[error("no hidden message found or message length invalid (capacity {capacity_bits} bits)")]
    LengthInvalid {
        length: Option<u32>,
        capacity_bits: usize,
    },

    /// 每像素通道数少于 3，无法提供 R、G、B 载体通道。
    #[error("pixel layout needs at least 3 channels per pixel, got {channels}")]
    InvalidChannelCount { channels: usize },

    /// 采样数不是每像素通道数的整数倍。
    #[error("buffer of {samples} samples is not a whole number of {channels}-channel pixels")]
    MisalignedBuffer { samples: usize, channels: usize },

    /// 传给位级原语的缓冲区长度与布局记录的采样数不一致。
    #[error("buffer has {samples} samples but the layout describes {expected}")]
    LayoutMismatch { samples: usize, expected: usize },

    #[error("bit index {bit_index} lies beyond the last carrier pixel")]
    BitOutOfRange { bit_index: usize },
}

impl StegoError {
    /// 该错误是否表示 "缓冲区中没有可解码的消息"。
    ///
    /// 对任意无关图像解码时，这是预期结果而不是真正的故障。
    pub fn is_no_message(&self) -> bool {
        matches!(self, StegoError::LengthInvalid { .. })
    }
}

pub type Result<T> = std::result::Result<T, StegoError>;
