//! # 隐写核心
//!
//! 两个位级原语 [`write_bits`] / [`read_bits`] 负责按高位在前的顺序在载体 LSB 上读写字节，
//! [`encode`] / [`decode`] 在它们之上实现带长度前缀的帧。
//! 所有函数都是纯函数：只操作调用者传入的缓冲区，不保留任何状态。

use crate::constants::{BITS_PER_BYTE, CARRIER_CHANNELS, HEADER_BITS, HEADER_LEN};
use crate::error::{Result, StegoError};
use crate::frame::{frame, parse_header, required_bits};
use crate::layout::CarrierLayout;
use log::{debug, trace};

/// 一次成功嵌入的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    pub payload_len: usize,
    /// 写入的载体位数 (含 32 位帧头)。
    pub bits_written: usize,
    pub capacity_bits: usize,
}

impl EmbedReport {
    /// 被写入过的载体像素数量 (`ceil(bits_written / 3)`)。
    pub fn pixels_touched(&self) -> usize {
        self.bits_written.div_ceil(CARRIER_CHANNELS)
    }
}

/// 确认 `[first_bit, first_bit + bits)` 全部落在载体像素内。
fn check_span(samples: usize, layout: &CarrierLayout, first_bit: usize, bits: usize) -> Result<()> {
    if samples != layout.samples() {
        return Err(StegoError::LayoutMismatch {
            samples,
            expected: layout.samples(),
        });
    }
    if bits == 0 {
        return Ok(());
    }

    let last_bit = first_bit
        .checked_add(bits - 1)
        .ok_or(StegoError::BitOutOfRange {
            bit_index: usize::MAX,
        })?;
    match layout.locate(last_bit) {
        Some(_) => Ok(()),
        None => Err(StegoError::BitOutOfRange {
            bit_index: last_bit,
        }),
    }
}

/// 从第 `first_bit` 个载体位开始，把 `bytes` 逐位写入采样的最低有效位。
///
/// 每个字节高位在前；采样的高 7 位保持不变。返回下一个未写入的位序号。
///
/// # Errors
///
/// * 写入范围超出最后一个载体像素时返回 [`StegoError::BitOutOfRange`]，此时缓冲区不会被修改。
/// * `samples` 的长度与 `layout` 描述的采样数不一致时返回 [`StegoError::LayoutMismatch`]。
pub fn write_bits(
    samples: &mut [u8],
    layout: &CarrierLayout,
    first_bit: usize,
    bytes: &[u8],
) -> Result<usize> {
    let bits = bytes.len() * BITS_PER_BYTE;
    check_span(samples.len(), layout, first_bit, bits)?;

    let mut bit_index = first_bit;
    for &byte in bytes {
        for shift in (0..BITS_PER_BYTE).rev() {
            let location = layout
                .locate(bit_index)
                .ok_or(StegoError::BitOutOfRange { bit_index })?;
            let bit = (byte >> shift) & 1;
            let sample = &mut samples[location.offset];
            *sample = (*sample & 0xFE) | bit;
            bit_index += 1;
        }
    }

    Ok(bit_index)
}

/// 从第 `first_bit` 个载体位开始读取，按高位在前填满 `out`。
///
/// 返回下一个未读取的位序号。缓冲区不会被修改。
///
/// # Errors
///
/// * 读取范围超出最后一个载体像素时返回 [`StegoError::BitOutOfRange`]。
/// * `samples` 的长度与 `layout` 描述的采样数不一致时返回 [`StegoError::LayoutMismatch`]。
pub fn read_bits(
    samples: &[u8],
    layout: &CarrierLayout,
    first_bit: usize,
    out: &mut [u8],
) -> Result<usize> {
    check_span(samples.len(), layout, first_bit, out.len() * BITS_PER_BYTE)?;

    let mut bit_index = first_bit;
    for byte in out.iter_mut() {
        let mut value = 0u8;
        for _ in 0..BITS_PER_BYTE {
            let location = layout
                .locate(bit_index)
                .ok_or(StegoError::BitOutOfRange { bit_index })?;
            value = (value << 1) | (samples[location.offset] & 1);
            bit_index += 1;
        }
        *byte = value;
    }

    Ok(bit_index)
}

/// 把 `payload` 作为带长度前缀的帧嵌入像素缓冲区。
///
/// `channels` 是每像素的采样数 (RGB 为 3，RGBA 为 4)；只有每个像素前 3 个采样会被改动。
///
/// # Errors
///
/// * 帧所需位数超过容量时返回 [`StegoError::CapacityExceeded`]，缓冲区保持原样。
/// * 布局非法时返回 [`StegoError::InvalidChannelCount`] 或 [`StegoError::MisalignedBuffer`]。
pub fn encode(samples: &mut [u8], channels: usize, payload: &[u8]) -> Result<EmbedReport> {
    let layout = CarrierLayout::new(channels, samples.len())?;
    let capacity_bits = layout.capacity_bits();
    let needed = required_bits(payload.len());

    let framed = match frame(payload) {
        Some(framed) if needed <= capacity_bits as u64 => framed,
        _ => {
            debug!(
                "refusing to embed {} bytes: {} bits needed, {} available",
                payload.len(),
                needed,
                capacity_bits
            );
            return Err(StegoError::CapacityExceeded {
                required_bits: needed,
                capacity_bits,
                max_payload: layout.max_payload(),
            });
        }
    };

    let bits_written = write_bits(samples, &layout, 0, &framed)?;
    debug!(
        "embedded {} payload bytes in {} of {} carrier bits",
        payload.len(),
        bits_written,
        capacity_bits
    );

    Ok(EmbedReport {
        payload_len: payload.len(),
        bits_written,
        capacity_bits,
    })
}

/// 从像素缓冲区中恢复嵌入的载荷。
///
/// 帧没有魔数或校验和：只要解出的长度不超过容量，任意图像都可能 "解出" 无意义的字节。
///
/// # Errors
///
/// * 解出的长度连同帧头超过容量 (或缓冲区放不下帧头) 时返回 [`StegoError::LengthInvalid`]，
///   表示缓冲区中没有消息。
/// * 布局非法时返回 [`StegoError::InvalidChannelCount`] 或 [`StegoError::MisalignedBuffer`]。
pub fn decode(samples: &[u8], channels: usize) -> Result<Vec<u8>> {
    let layout = CarrierLayout::new(channels, samples.len())?;
    let capacity_bits = layout.capacity_bits();

    if capacity_bits < HEADER_BITS {
        debug!("buffer holds only {capacity_bits} carrier bits, too few for a header");
        return Err(StegoError::LengthInvalid {
            length: None,
            capacity_bits,
        });
    }

    let mut header = [0u8; HEADER_LEN];
    let next_bit = read_bits(samples, &layout, 0, &mut header)?;
    let length = parse_header(header);
    trace!("header bits decode to length {length}");

    if required_bits(length as usize) > capacity_bits as u64 {
        debug!("decoded length {length} exceeds capacity of {capacity_bits} bits");
        return Err(StegoError::LengthInvalid {
            length: Some(length),
            capacity_bits,
        });
    }

    let mut payload = vec![0u8; length as usize];
    read_bits(samples, &layout, next_bit, &mut payload)?;
    debug!("recovered {length} payload bytes");

    Ok(payload)
}

/// 缓冲区最多能嵌入的载荷字节数。
///
/// # Errors
///
/// 布局非法时返回 [`StegoError::InvalidChannelCount`] 或 [`StegoError::MisalignedBuffer`]。
pub fn capacity(samples: &[u8], channels: usize) -> Result<usize> {
    Ok(CarrierLayout::new(channels, samples.len())?.max_payload())
}
