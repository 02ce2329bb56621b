use crate::image_classifier::interface::CropAndScale;
use image::{imageops, RgbImage};
use tract_onnx::prelude::*;

/// ImageNet channel statistics the MobileNet family was trained with.
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

pub fn fit_image(image: &RgbImage, width: u32, height: u32, crop: CropAndScale) -> RgbImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);

    match crop {
        CropAndScale::ScaleFill => {
            imageops::resize(image, width, height, imageops::FilterType::Triangle)
        }
        CropAndScale::CenterCrop => {
            // Crop the source to the target aspect ratio before scaling
            let target_ratio = width as f32 / height as f32;
            let (crop_w, crop_h) = if w / h > target_ratio {
                (((h * target_ratio).round() as u32).clamp(1, image.width()), image.height())
            } else {
                (image.width(), ((w / target_ratio).round() as u32).clamp(1, image.height()))
            };

            let x_offset = (image.width() - crop_w) / 2;
            let y_offset = (image.height() - crop_h) / 2;

            let cropped = imageops::crop_imm(image, x_offset, y_offset, crop_w, crop_h).to_image();

            imageops::resize(&cropped, width, height, imageops::FilterType::Triangle)
        }
        CropAndScale::ScaleFit => {
            let scale = (width as f32 / w).min(height as f32 / h);
            let new_w = ((w * scale) as u32).clamp(1, width);
            let new_h = ((h * scale) as u32).clamp(1, height);

            let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);

            let mut padded = RgbImage::new(width, height);
            let x_offset = (width - new_w) / 2;
            let y_offset = (height - new_h) / 2;
            imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

            padded
        }
    }
}

pub fn normalize(value: u8, channel: usize) -> f32 {
    (value as f32 / 255.0 - MEAN[channel]) / STD[channel]
}

fn image_to_tensor(image: &RgbImage) -> Tensor {
    let (width, height) = (image.width() as usize, image.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = image.get_pixel(x as u32, y as u32);
        normalize(pixel[c], c)
    })
    .into_tensor()
}

/// Fits `image` to `width`x`height` and lays it out as a normalized NCHW tensor.
pub fn resize_image_to_tensor(
    image: &RgbImage,
    width: u32,
    height: u32,
    crop: CropAndScale,
) -> Tensor {
    let fitted = fit_image(image, width, height, crop);
    image_to_tensor(&fitted)
}
