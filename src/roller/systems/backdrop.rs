//! Backdrop texture loading
//!
//! Fetching goes through the ranked provider chain on a background thread
//! so a slow remote source never stalls the frame loop; the result lands in
//! a shared inbox that the apply system drains once per frame.

use std::sync::{Arc, Mutex};
use std::thread;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::roller::fetch::{fetch_backdrop, BackdropProvider, FetchError, LoadedBackdrop};
use crate::roller::types::TableSurface;

/// Provider chain configured at startup
#[derive(Resource)]
pub struct BackdropConfig {
    pub providers: Vec<BackdropProvider>,
}

/// Shared inbox for the background fetch
#[derive(Resource, Default)]
pub struct BackdropLoader {
    inbox: Arc<Mutex<Option<Result<LoadedBackdrop, FetchError>>>>,
    applied: bool,
}

/// Startup system: kick off the fetch on a background thread
pub fn begin_backdrop_fetch(config: Res<BackdropConfig>, loader: Res<BackdropLoader>) {
    let providers = config.providers.clone();
    let inbox = Arc::clone(&loader.inbox);

    thread::spawn(move || {
        let result = fetch_backdrop(&providers);
        if let Ok(mut slot) = inbox.lock() {
            *slot = Some(result);
        }
    });
}

/// Frame system: apply a finished fetch to the table floor material
pub fn apply_backdrop(
    mut loader: ResMut<BackdropLoader>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    floor_query: Query<&MeshMaterial3d<StandardMaterial>, With<TableSurface>>,
) {
    if loader.applied {
        return;
    }

    let result = {
        let Ok(mut slot) = loader.inbox.lock() else {
            return;
        };
        match slot.take() {
            Some(result) => result,
            None => return,
        }
    };

    match result {
        Ok(backdrop) => {
            let handle = images.add(Image::new(
                Extent3d {
                    width: backdrop.width,
                    height: backdrop.height,
                    depth_or_array_layers: 1,
                },
                TextureDimension::D2,
                backdrop.rgba,
                TextureFormat::Rgba8UnormSrgb,
                RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
            ));

            for material_handle in floor_query.iter() {
                if let Some(material) = materials.get_mut(&material_handle.0) {
                    material.base_color = Color::WHITE;
                    material.base_color_texture = Some(handle.clone());
                }
            }

            info!("backdrop texture applied");
            loader.applied = true;
        }
        Err(err) => {
            // The generated fallback makes this unreachable with the default
            // chain, but a hand-edited settings file can still get here.
            warn!("{}", err);
            loader.applied = true;
        }
    }
}
