//! Procedural pip textures for die faces
//!
//! Face textures are drawn into an RGBA buffer (face background plus the
//! standard pip layout for the value) and memoized in an explicit cache
//! resource keyed by (face value, pip color, face color). The cache is owned
//! by the app, not a module-level global; repeated lookups for the same key
//! return the same image handle.

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::RgbaImage;

/// Pixel size of one face texture (square)
const FACE_TEXTURE_SIZE: u32 = 128;

/// Pip radius as a fraction of the face edge
const PIP_RADIUS: f32 = 0.09;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct PipKey {
    value: u32,
    pip: [u8; 4],
    face: [u8; 4],
}

/// Memoization table for rendered pip face textures
#[derive(Resource, Default)]
pub struct PipTextureCache {
    entries: HashMap<PipKey, Handle<Image>>,
}

impl PipTextureCache {
    /// Look up the texture for (value, colors), rendering and caching it on
    /// first use.
    pub fn get_or_create(
        &mut self,
        value: u32,
        pip_color: Color,
        face_color: Color,
        images: &mut Assets<Image>,
    ) -> Handle<Image> {
        let key = PipKey {
            value,
            pip: pip_color.to_srgba().to_u8_array(),
            face: face_color.to_srgba().to_u8_array(),
        };

        if let Some(handle) = self.entries.get(&key) {
            return handle.clone();
        }

        let rgba = draw_face(value, key.pip, key.face);
        let handle = images.add(bevy_image_from_rgba8(
            FACE_TEXTURE_SIZE,
            FACE_TEXTURE_SIZE,
            rgba.into_raw(),
        ));
        self.entries.insert(key, handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pip centers for a face value, in [0,1] face coordinates.
fn pip_centers(value: u32) -> Vec<(f32, f32)> {
    let lo = 0.26;
    let mid = 0.5;
    let hi = 0.74;

    match value {
        1 => vec![(mid, mid)],
        2 => vec![(lo, lo), (hi, hi)],
        3 => vec![(lo, lo), (mid, mid), (hi, hi)],
        4 => vec![(lo, lo), (lo, hi), (hi, lo), (hi, hi)],
        5 => vec![(lo, lo), (lo, hi), (mid, mid), (hi, lo), (hi, hi)],
        6 => vec![
            (lo, lo),
            (lo, mid),
            (lo, hi),
            (hi, lo),
            (hi, mid),
            (hi, hi),
        ],
        _ => Vec::new(),
    }
}

fn draw_face(value: u32, pip: [u8; 4], face: [u8; 4]) -> RgbaImage {
    let size = FACE_TEXTURE_SIZE;
    let centers = pip_centers(value);
    let radius = PIP_RADIUS * size as f32;

    RgbaImage::from_fn(size, size, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;

        // Coverage of the nearest pip, with a one-pixel soft edge.
        let mut coverage: f32 = 0.0;
        for (cx, cy) in &centers {
            let dx = px - cx * size as f32;
            let dy = py - cy * size as f32;
            let dist = (dx * dx + dy * dy).sqrt();
            coverage = coverage.max((radius + 0.5 - dist).clamp(0.0, 1.0));
        }

        let mut out = [0u8; 4];
        for i in 0..4 {
            let mixed = face[i] as f32 + (pip[i] as f32 - face[i] as f32) * coverage;
            out[i] = mixed.round() as u8;
        }
        image::Rgba(out)
    })
}

fn bevy_image_from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_counts_match_values() {
        for value in 1..=6 {
            assert_eq!(pip_centers(value).len(), value as usize);
        }
        assert!(pip_centers(7).is_empty());
    }

    #[test]
    fn test_cache_returns_same_handle_for_same_key() {
        let mut images = Assets::<Image>::default();
        let mut cache = PipTextureCache::default();
        let pip = Color::srgb(0.0, 0.0, 0.0);
        let face = Color::srgb(1.0, 1.0, 1.0);

        let a = cache.get_or_create(4, pip, face, &mut images);
        let b = cache.get_or_create(4, pip, face, &mut images);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_value_and_color() {
        let mut images = Assets::<Image>::default();
        let mut cache = PipTextureCache::default();
        let pip = Color::srgb(0.0, 0.0, 0.0);
        let face = Color::srgb(1.0, 1.0, 1.0);

        let four = cache.get_or_create(4, pip, face, &mut images);
        let five = cache.get_or_create(5, pip, face, &mut images);
        let red_four = cache.get_or_create(4, Color::srgb(1.0, 0.0, 0.0), face, &mut images);

        assert_ne!(four, five);
        assert_ne!(four, red_four);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_face_draws_pip_and_background() {
        let img = draw_face(1, [0, 0, 0, 255], [255, 255, 255, 255]);
        let center = img.get_pixel(FACE_TEXTURE_SIZE / 2, FACE_TEXTURE_SIZE / 2);
        let corner = img.get_pixel(2, 2);
        assert_eq!(center.0[0], 0);
        assert_eq!(corner.0[0], 255);
    }
}
