// Copyright @yucwang 2026

use crate::math::constants::Float;

use exr::prelude::*;
use image::io::Reader as ImageReader;
use image::GenericImageView;
use std::path::Path;

/// Row-major grid of normalised heights. Rows run along local z.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSamples {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Float>,
}

impl HeightSamples {
    /// Pad single-row or single-column grids by repeating their edge so
    /// that there is at least one cell to triangulate.
    pub fn ensure_min_size(self) -> HeightSamples {
        if self.width >= 2 && self.height >= 2 {
            return self;
        }
        if self.width == 0 || self.height == 0 || self.data.is_empty() {
            return HeightSamples { width: 2, height: 2, data: vec![0.0; 4] };
        }

        let width = self.width.max(2);
        let height = self.height.max(2);
        let mut data = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                let sx = x.min(self.width - 1);
                let sz = z.min(self.height - 1);
                data.push(self.data.get(sz * self.width + sx).copied().unwrap_or(0.0));
            }
        }
        HeightSamples { width, height, data }
    }
}

pub fn load_heightmap(path: &str) -> std::result::Result<HeightSamples, String> {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::info!("Loading heightmap: {}.", path);
    match ext.as_str() {
        "exr" => load_exr_heightmap(path),
        "png" | "jpg" | "jpeg" => load_image_heightmap(path),
        _ => Err(format!("unsupported heightmap format: {}", ext)),
    }
}

// 8/16-bit images: the mean of the color channels, already in [0, 1].
fn load_image_heightmap(path: &str) -> std::result::Result<HeightSamples, String> {
    let img = ImageReader::open(path)
        .map_err(|e| format!("failed to open heightmap {}: {}", path, e))?
        .decode()
        .map_err(|e| format!("failed to decode heightmap {}: {}", path, e))?;

    let (width, height) = img.dimensions();
    let rgb = img.to_rgb32f();
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let p = rgb.get_pixel(x, y);
            data.push((p[0] + p[1] + p[2]) / 3.0);
        }
    }

    Ok(HeightSamples { width: width as usize, height: height as usize, data })
}

// Float images: the red channel, clamped when the heightmap is sampled.
fn load_exr_heightmap(path: &str) -> std::result::Result<HeightSamples, String> {
    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| HeightSamples {
                width: resolution.width(),
                height: resolution.height(),
                data: vec![0.0; resolution.width() * resolution.height()],
            },
            |samples: &mut HeightSamples, position, (r, _g, _b, _a): (f32, f32, f32, f32)| {
                let idx = position.y() * samples.width + position.x();
                samples.data[idx] = r;
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(path)
        .map_err(|e| format!("failed to read exr {}: {}", path, e))?;

    Ok(image.layer_data.channel_data.pixels)
}
