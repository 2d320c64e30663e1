//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::CarrierImage;
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{
    HIDDEN_IMAGE_EXTENSION, HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_EXTENSION, RECOVERED_TEXT_PREFIX,
};
use crate::error::StegoError;
use crate::layout::CarrierLayout;
use crate::steganography::{decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 在 `image` 所在目录下生成 `<prefix><文件名主干>.<extension>` 形式的默认输出路径。
pub fn default_output_path(image: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| "image".into());
    let file_name = format!("{prefix}{stem}.{extension}");

    match image.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 目标文件已存在且未指定 `--force` 时拒绝继续。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和载荷、检查隐写空间是否足够、调用隐写核心函数嵌入帧，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 载荷为空。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let payload = match (&args.text, args.message) {
        (Some(text), _) => fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.into_bytes(),
        (None, None) => Vec::new(),
    };

    anyhow::ensure!(!payload.is_empty(), "Nothing to hide: the message is empty.");

    let dest = args.dest.unwrap_or_else(|| {
        default_output_path(&args.image, HIDDEN_IMAGE_PREFIX, HIDDEN_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let mut picture = CarrierImage::open(&args.image)?;
    let channels = picture.channels();

    let report = match encode(picture.samples_mut(), channels, &payload) {
        Ok(report) => report,
        Err(StegoError::CapacityExceeded { max_payload, .. }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {} bytes, Available: {} bytes",
            payload.len().to_string().red().bold(),
            max_payload.to_string().green().bold()
        ),
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Failed to hide the message in '{}'.",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    };
    info!(
        "{} of {} carrier bits used across {} pixels",
        report.bits_written,
        report.capacity_bits,
        report.pixels_touched()
    );

    picture.save(&dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用解码核心函数，
/// 最后将恢复的内容写入目标文件或打印到标准输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有可解码的消息。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = CarrierImage::open(&args.image)?;

    let payload = match decode(picture.samples(), picture.channels()) {
        Ok(payload) => payload,
        Err(err) if err.is_no_message() => anyhow::bail!(
            "No hidden message found or message length invalid in '{}'.",
            args.image.to_string_lossy().red().bold()
        ),
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Failed to recover the message from '{}'. \nThe image may be corrupted.",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    };
    info!("recovered {} bytes", payload.len());

    if args.stdout {
        println!("{}", String::from_utf8_lossy(&payload));
        return Ok(());
    }

    let text_path = args.text.unwrap_or_else(|| {
        default_output_path(&args.image, RECOVERED_TEXT_PREFIX, RECOVERED_TEXT_EXTENSION)
    });
    ensure_writable(&text_path, args.force)?;

    fs::write(&text_path, payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告图像的载体容量。
///
/// # Errors
///
/// 无法读取图像文件时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = CarrierImage::open(&args.image)?;
    let layout = CarrierLayout::new(picture.channels(), picture.samples().len())?;

    println!(
        "{} ({}x{}, {} channels): {} carrier bits, max payload {} bytes",
        args.image.to_string_lossy().bold(),
        picture.width(),
        picture.height(),
        picture.channels(),
        layout.capacity_bits(),
        layout.max_payload().to_string().green().bold()
    );
    Ok(())
}
