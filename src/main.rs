use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;

use tumbledice::roller::{
    apply_backdrop, begin_backdrop_fetch, check_dice_settled, handle_input, provider_chain,
    rotate_camera, setup, start_requested_rolls, update_results_display, AppSettings,
    BackdropConfig, BackdropLoader, DiceResults, PipTextureCache, RollRequested, RollState,
    ZoomState,
};

/// Click-to-roll 3D dice toy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a RON settings file
    #[arg(short, long, default_value = "tumbledice.ron")]
    settings: PathBuf,

    /// Number of dice to roll
    #[arg(short, long)]
    dice: Option<usize>,

    /// Die body color (CSS color string, e.g. "ivory" or "#c03030")
    #[arg(long)]
    die_color: Option<String>,

    /// Pip color (CSS color string)
    #[arg(long)]
    pip_color: Option<String>,

    /// Linear speed below which a die counts as at rest
    #[arg(long)]
    linear_threshold: Option<f32>,

    /// Angular speed below which a die counts as at rest
    #[arg(long)]
    angular_threshold: Option<f32>,

    /// Seconds the rest predicate must hold before a roll finishes
    /// (0 = instantaneous, matching the reference behavior)
    #[arg(long)]
    settle_hold: Option<f32>,

    /// Skip remote backdrop providers and use the generated felt
    #[arg(long)]
    offline: bool,
}

fn main() {
    let args = Args::parse();

    let mut settings = AppSettings::load(&args.settings);
    if let Some(dice) = args.dice {
        settings.dice = dice;
    }
    if let Some(color) = args.die_color {
        settings.die_color = color;
    }
    if let Some(color) = args.pip_color {
        settings.pip_color = color;
    }
    if let Some(threshold) = args.linear_threshold {
        settings.linear_threshold = threshold;
    }
    if let Some(threshold) = args.angular_threshold {
        settings.angular_threshold = threshold;
    }
    if let Some(hold) = args.settle_hold {
        settings.settle_hold_secs = hold;
    }
    if args.offline {
        settings.offline = true;
    }

    let style = match settings.to_style() {
        Ok(style) => style,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    };
    let tuning = settings.to_tuning();
    let providers = provider_chain(&settings.backdrop_urls, settings.offline);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tumbledice".to_string(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(style)
        .insert_resource(tuning)
        .insert_resource(DiceResults::default())
        .insert_resource(RollState::default())
        .insert_resource(ZoomState::default())
        .insert_resource(PipTextureCache::default())
        .insert_resource(BackdropLoader::default())
        .insert_resource(BackdropConfig { providers })
        .add_message::<RollRequested>()
        .add_systems(Startup, (setup, begin_backdrop_fetch))
        .add_systems(
            Update,
            (
                handle_input,
                start_requested_rolls,
                check_dice_settled,
                update_results_display,
                rotate_camera,
                apply_backdrop,
            ),
        )
        .run();
}
