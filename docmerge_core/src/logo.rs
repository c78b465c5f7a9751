use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use image::ImageFormat;

use crate::MergeError;
use crate::MergeResult;

/// English Metric Units per pixel at 96 DPI.
pub const EMU_PER_PIXEL: u32 = 9525;

/// Convert a pixel length to English Metric Units, the native image size
/// unit of OOXML documents.
pub fn pixels_to_emu(pixels: u32) -> u32 {
	pixels.saturating_mul(EMU_PER_PIXEL)
}

/// An image decoded once and embedded wherever the logo marker appears.
#[derive(Debug, Clone)]
pub struct LogoImage {
	name: String,
	bytes: Vec<u8>,
	format: ImageFormat,
	width: u32,
	height: u32,
}

impl LogoImage {
	/// Read and decode an image file.
	#[tracing::instrument(skip_all, fields(path = %path.display()))]
	pub fn open(path: &Path) -> MergeResult<Self> {
		let name = path.display().to_string();
		let bytes = std::fs::read(path).map_err(|e| {
			MergeError::ImageDecode {
				path: name.clone(),
				reason: e.to_string(),
			}
		})?;

		Self::from_bytes(name, bytes)
	}

	/// Decode an image held in memory. `name` identifies it in errors.
	pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> MergeResult<Self> {
		let name = name.into();
		let decode_error = |reason: String| {
			MergeError::ImageDecode {
				path: name.clone(),
				reason,
			}
		};

		let format = image::guess_format(&bytes).map_err(|e| decode_error(e.to_string()))?;
		let decoded = image::load_from_memory_with_format(&bytes, format)
			.map_err(|e| decode_error(e.to_string()))?;
		let (width, height) = (decoded.width(), decoded.height());
		tracing::debug!(width, height, ?format, "decoded logo image");

		Ok(Self {
			name,
			bytes,
			format,
			width,
			height,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The encoded image as read from disk.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn format(&self) -> ImageFormat {
		self.format
	}

	pub fn width_px(&self) -> u32 {
		self.width
	}

	pub fn height_px(&self) -> u32 {
		self.height
	}

	pub fn width_emu(&self) -> u32 {
		pixels_to_emu(self.width)
	}

	pub fn height_emu(&self) -> u32 {
		pixels_to_emu(self.height)
	}

	/// PNG encoding of the image. Returns the original bytes when the source
	/// already is a PNG.
	pub fn to_png(&self) -> MergeResult<Vec<u8>> {
		if self.format == ImageFormat::Png {
			return Ok(self.bytes.clone());
		}

		let decoded: DynamicImage = image::load_from_memory_with_format(&self.bytes, self.format)
			.map_err(|e| MergeError::ImageEmbed(e.to_string()))?;
		let mut buffer = Vec::new();
		decoded
			.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
			.map_err(|e| {
				MergeError::ImageEmbed(format!("cannot convert `{}` to PNG: {e}", self.name))
			})?;

		Ok(buffer)
	}
}
