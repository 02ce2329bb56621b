use crate::recognizer::error::RecognizerError;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Luma8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A decoded image as handed over by whoever picked it.
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    #[allow(dead_code)]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn has_zero_area(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.format.channels())
    }

    /// Converts into the RGB8 buffer the classifier consumes.
    pub fn to_rgb(&self) -> Result<RgbImage, RecognizerError> {
        if self.expected_len() != Some(self.pixels.len()) {
            return Err(RecognizerError::Conversion);
        }

        let pixels = self.pixels.clone();
        let converted = match self.format {
            PixelFormat::Luma8 => GrayImage::from_raw(self.width, self.height, pixels)
                .map(|buffer| DynamicImage::ImageLuma8(buffer).to_rgb8()),
            PixelFormat::Rgb8 => RgbImage::from_raw(self.width, self.height, pixels),
            PixelFormat::Rgba8 => RgbaImage::from_raw(self.width, self.height, pixels)
                .map(|buffer| DynamicImage::ImageRgba8(buffer).to_rgb8()),
        };

        converted.ok_or(RecognizerError::Conversion)
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(buffer) => {
                Bitmap::new(width, height, PixelFormat::Luma8, buffer.into_raw())
            }
            DynamicImage::ImageRgb8(buffer) => {
                Bitmap::new(width, height, PixelFormat::Rgb8, buffer.into_raw())
            }
            other => Bitmap::new(width, height, PixelFormat::Rgba8, other.to_rgba8().into_raw()),
        }
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bitmap({}x{} {:?}, {} bytes)",
            self.width,
            self.height,
            self.format,
            self.pixels.len()
        )
    }
}
