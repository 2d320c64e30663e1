//! # 位寻址模块
//!
//! 把帧中的线性位序号映射到像素缓冲区里的具体采样位置。
//! 编码与解码都只通过 [`CarrierLayout::locate`] 计算位置，从而保证两个方向逐位对称。

use crate::constants::{BITS_PER_BYTE, CARRIER_CHANNELS, HEADER_LEN};
use crate::error::{Result, StegoError};
use crate::frame::required_bits;

/// 载体采样在像素中的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Channel::Red,
            1 => Channel::Green,
            _ => Channel::Blue,
        }
    }

    /// 通道在像素内的下标 (R = 0, G = 1, B = 2)。
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// 某一帧位在缓冲区中的落点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLocation {
    /// 缓冲区中的绝对采样偏移 (`pixel * K + channel`)。
    pub offset: usize,
    pub channel: Channel,
}

/// 扁平像素缓冲区的布局：每像素 `channels` 个 8 位采样，共 `samples` 个采样。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierLayout {
    channels: usize,
    samples: usize,
}

impl CarrierLayout {
    /// 校验并创建布局。
    ///
    /// # Errors
    ///
    /// * 每像素通道数少于 3 时返回 [`StegoError::InvalidChannelCount`]。
    /// * 采样数不是通道数的整数倍时返回 [`StegoError::MisalignedBuffer`]。
    pub fn new(channels: usize, samples: usize) -> Result<Self> {
        if channels < CARRIER_CHANNELS {
            return Err(StegoError::InvalidChannelCount { channels });
        }
        if samples % channels != 0 {
            return Err(StegoError::MisalignedBuffer { samples, channels });
        }
        Ok(Self { channels, samples })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// 载体像素的数量。
    pub fn pixels(&self) -> usize {
        self.samples / self.channels
    }

    /// 以位计的容量：每个像素 3 bits。
    pub fn capacity_bits(&self) -> usize {
        self.pixels() * CARRIER_CHANNELS
    }

    /// 该缓冲区最多能嵌入的载荷字节数 (扣除 4 字节帧头，下限为 0)。
    pub fn max_payload(&self) -> usize {
        (self.capacity_bits() / BITS_PER_BYTE).saturating_sub(HEADER_LEN)
    }

    /// 长度为 `payload_len` 的载荷能否完整嵌入。
    pub fn fits(&self, payload_len: usize) -> bool {
        required_bits(payload_len) <= self.capacity_bits() as u64
    }

    /// 把帧位序号映射到采样位置；像素序号越界时返回 `None`。
    pub fn locate(&self, bit_index: usize) -> Option<BitLocation> {
        let pixel = bit_index / CARRIER_CHANNELS;
        if pixel >= self.pixels() {
            return None;
        }
        let channel = Channel::from_index(bit_index % CARRIER_CHANNELS);
        Some(BitLocation {
            offset: pixel * self.channels + channel.index(),
            channel,
        })
    }
}
