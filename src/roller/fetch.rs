//! Backdrop texture acquisition
//!
//! The table backdrop can come from any of a ranked list of providers. Each
//! provider is tried in order; remote sources go through a blocking reqwest
//! client, and the final `Generated` provider synthesizes a felt texture so
//! the toy still looks right with no network at all. If every provider fails
//! the caller gets one aggregated error naming each failure.

use std::time::Duration;

use image::GenericImageView;
use rand::Rng;
use thiserror::Error;

/// Pixel size of the generated fallback texture (square)
const GENERATED_SIZE: u32 = 256;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// One source of backdrop image bytes, in priority order.
#[derive(Clone, Debug)]
pub enum BackdropProvider {
    /// Fetch an encoded image over HTTP
    Remote(String),
    /// Synthesize a felt texture locally (never fails)
    Generated,
}

/// Raw RGBA pixels ready to become a Bevy image.
#[derive(Debug)]
pub struct LoadedBackdrop {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Every provider in the chain failed.
#[derive(Debug, Error)]
#[error("all {} backdrop providers failed: {}", .failures.len(), .failures.join("; "))]
pub struct FetchError {
    pub failures: Vec<String>,
}

/// Try each provider in order, returning the first success or the
/// aggregated failure.
pub fn fetch_backdrop(providers: &[BackdropProvider]) -> Result<LoadedBackdrop, FetchError> {
    let mut failures = Vec::new();

    for provider in providers {
        match provider {
            BackdropProvider::Remote(url) => match fetch_remote(url) {
                Ok(backdrop) => return Ok(backdrop),
                Err(reason) => failures.push(format!("{}: {}", url, reason)),
            },
            BackdropProvider::Generated => return Ok(generate_felt()),
        }
    }

    if failures.is_empty() {
        failures.push(String::from("no providers configured"));
    }
    Err(FetchError { failures })
}

/// Build the provider chain from configured URLs. The generated fallback is
/// always last, so the chain as built here cannot fail outright; `offline`
/// skips the remote tiers entirely.
pub fn provider_chain(urls: &[String], offline: bool) -> Vec<BackdropProvider> {
    let mut providers = Vec::new();
    if !offline {
        providers.extend(urls.iter().cloned().map(BackdropProvider::Remote));
    }
    providers.push(BackdropProvider::Generated);
    providers
}

fn fetch_remote(url: &str) -> Result<LoadedBackdrop, String> {
    let response = reqwest::blocking::Client::new()
        .get(url)
        .timeout(REMOTE_TIMEOUT)
        .send()
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let bytes = response.bytes().map_err(|e| e.to_string())?;
    let img = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let (width, height) = img.dimensions();

    Ok(LoadedBackdrop {
        rgba: img.to_rgba8().into_raw(),
        width,
        height,
    })
}

/// Dark green felt with per-pixel brightness noise.
fn generate_felt() -> LoadedBackdrop {
    let mut rng = rand::thread_rng();
    let size = GENERATED_SIZE;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);

    for _ in 0..size * size {
        let noise: f32 = rng.gen_range(-0.04..0.04);
        let r = ((0.08 + noise) * 255.0).clamp(0.0, 255.0) as u8;
        let g = ((0.32 + noise) * 255.0).clamp(0.0, 255.0) as u8;
        let b = ((0.14 + noise) * 255.0).clamp(0.0, 255.0) as u8;
        rgba.extend_from_slice(&[r, g, b, 255]);
    }

    LoadedBackdrop {
        rgba,
        width: size,
        height: size,
    }
}
