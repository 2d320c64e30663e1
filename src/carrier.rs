//! # 载体图像模块
//!
//! 图像文件与扁平像素缓冲区之间的转换。编解码核心只看到 [`CarrierImage::samples`]，
//! 不关心文件格式。

use crate::constants::{RGB_CHANNELS, RGBA_CHANNELS};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ColorType, DynamicImage, GenericImageView};
use log::{debug, warn};
use std::path::Path;

/// 该颜色类型的每个通道是否超过 8 位 (16 位整数或 32 位浮点)。
pub fn narrows_depth(color: ColorType) -> bool {
    color.bytes_per_pixel() > color.channel_count()
}

/// 解码后的载体图像：每像素 3 (RGB) 或 4 (RGBA) 个 8 位采样。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierImage {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
}

impl CarrierImage {
    /// 读取并解码图像文件。
    ///
    /// 带 Alpha 通道的图像转换为 RGBA8，其余转换为 RGB8。
    ///
    /// # Errors
    ///
    /// 文件无法读取或格式不受支持时返回错误。
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        Ok(Self::from_dynamic(image))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let color = image.color();
        if narrows_depth(color) {
            warn!(
                "{color:?} image will be reduced to 8 bits per channel; the saved image loses its original bit depth"
            );
        }

        let (channels, samples) = if color.has_alpha() {
            (RGBA_CHANNELS, image.into_rgba8().into_raw())
        } else {
            (RGB_CHANNELS, image.into_rgb8().into_raw())
        };
        debug!("loaded {width}x{height} {color:?} image as {channels}-channel samples");

        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// 以目标路径扩展名对应的格式保存图像。
    ///
    /// # Errors
    ///
    /// 扩展名不对应受支持的格式，或写入失败时返回错误。
    pub fn save(&self, path: &Path) -> Result<()> {
        let color = if self.channels == RGBA_CHANNELS {
            ColorType::Rgba8
        } else {
            ColorType::Rgb8
        };

        image::save_buffer(path, &self.samples, self.width, self.height, color).with_context(
            || {
                format!(
                    "Unable to write to target image file: {}",
                    path.to_string_lossy().red().bold()
                )
            },
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn flags_wide_channel_formats() {
        assert!(narrows_depth(ColorType::Rgba16));
        assert!(narrows_depth(ColorType::Rgb16));
        assert!(narrows_depth(ColorType::Rgb32F));
        assert!(!narrows_depth(ColorType::Rgba8));
        assert!(!narrows_depth(ColorType::L8));
    }

    #[test]
    fn sixteen_bit_cover_becomes_eight_bit_rgba() {
        let wide = ImageBuffer::from_pixel(3, 2, Rgba([0xFFFFu16, 0x0000, 0x8080, 0xFFFF]));
        let picture = CarrierImage::from_dynamic(DynamicImage::ImageRgba16(wide));

        assert_eq!(picture.channels(), RGBA_CHANNELS);
        assert_eq!(picture.samples().len(), 3 * 2 * RGBA_CHANNELS);
        assert_eq!(&picture.samples()[..4], &[0xFF, 0x00, 0x80, 0xFF]);
    }
}
