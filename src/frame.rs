//! # 帧格式
//!
//! ```text
//! offset 0..3       : u32, 大端序，载荷长度 L (字节)
//! offset 4..4+L-1   : 原始载荷字节
//! ```
//!
//! 帧以位流形式嵌入：先帧头后载荷，每个字节内高位在前。

use crate::constants::{BITS_PER_BYTE, HEADER_LEN};

/// 把载荷封装为 `帧头 ++ 载荷`。
///
/// 载荷长度超过 `u32::MAX` 时无法编码进帧头，返回 `None`。
pub fn frame(payload: &[u8]) -> Option<Vec<u8>> {
    let length = u32::try_from(payload.len()).ok()?;

    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(payload);
    Some(framed)
}

/// 解析 4 字节大端序帧头。
pub fn parse_header(header: [u8; HEADER_LEN]) -> u32 {
    u32::from_be_bytes(header)
}

/// 长度为 `payload_len` 的载荷连同帧头所需的位数。
pub fn required_bits(payload_len: usize) -> u64 {
    (payload_len as u64)
        .saturating_add(HEADER_LEN as u64)
        .saturating_mul(BITS_PER_BYTE as u64)
}
