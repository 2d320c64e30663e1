/// 帧头的字节数：一个大端序 `u32`，记录载荷长度。
pub const HEADER_LEN: usize = 4;

/// 帧头占用的载体位数 (4 字节 × 8 bits)。
pub const HEADER_BITS: usize = HEADER_LEN * BITS_PER_BYTE;

pub const BITS_PER_BYTE: usize = 8;

/// 每个像素中可承载数据的通道数 (R, G, B)。
/// 每个载体通道只在最低有效位存储 1 bit。
pub const CARRIER_CHANNELS: usize = 3;

/// 无 Alpha 通道图像的每像素采样数。
pub const RGB_CHANNELS: usize = 3;

/// 带 Alpha 通道图像的每像素采样数。
pub const RGBA_CHANNELS: usize = 4;

/// 未指定 `--dest` 时，隐写结果图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定 `--text` 时，恢复出的载荷文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// 默认输出图像格式的扩展名 (必须是无损格式)。
pub const HIDDEN_IMAGE_EXTENSION: &str = "png";

pub const RECOVERED_TEXT_EXTENSION: &str = "txt";
