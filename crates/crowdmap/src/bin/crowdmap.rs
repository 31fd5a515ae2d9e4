//! # CROWDMAP Headless Demo
//!
//! Runs the full shell against a recording surface: the user is located,
//! a few people are dropped on the map, and the world is left to wander.
//!
//! ```bash
//! # Stock configuration
//! RUST_LOG=info ./crowdmap
//!
//! # Custom configuration
//! RUST_LOG=crowdmap=debug ./crowdmap crowdmap.toml
//! ```

use std::process::ExitCode;
use std::time::Duration;

use crowdmap::core::{EngineFacade, PeopleEngine};
use crowdmap::render::{RecordingSurface, SyncLoop};
use crowdmap::{stop_channel, CrowdmapConfig, FixedGeolocator, MapShell, ShellEvent, SyncDriver};
use tokio::sync::mpsc;

/// How long the demo runs before stopping.
const RUN_TIME: Duration = Duration::from_secs(3);

/// Ticks that pass before the engine finishes loading.
const ENGINE_LOAD_TICKS: u32 = 3;

/// Clicks relative to the map center, in degrees.
const CLICK_OFFSETS: [(f64, f64); 4] = [
    (0.004, 0.006),
    (-0.003, 0.002),
    (0.001, -0.008),
    (-0.006, -0.004),
];

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => match CrowdmapConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::error!(%error, "cannot start");
                return ExitCode::FAILURE;
            }
        },
        None => CrowdmapConfig::default(),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "cannot build runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(&config));
    ExitCode::SUCCESS
}

async fn run(config: &CrowdmapConfig) {
    let center = config.initial_view.center;

    let sync = SyncLoop::new(None, RecordingSurface::new(), config.styles.clone());
    let mut shell = MapShell::new(sync, FixedGeolocator::new(center), config);
    let driver = SyncDriver::from_config(config);

    // The map is up before the engine: these ticks find nothing to do.
    let (_idle_input, idle_events) = mpsc::unbounded_channel();
    let (idle_stop, idle_signal) = stop_channel();
    let loading = async {
        tokio::time::sleep(driver.period() * ENGINE_LOAD_TICKS).await;
        idle_stop.stop();
    };
    let (idle, ()) = tokio::join!(driver.run(&mut shell, idle_events, idle_signal), loading);

    if shell
        .sync_mut()
        .attach_engine(PeopleEngine::new(config.movement))
        .is_none()
    {
        tracing::info!(
            seed = config.movement.seed,
            idle_ticks = idle.ticks,
            "engine loaded"
        );
    }

    let (input, events) = mpsc::unbounded_channel();
    let (stop, signal) = stop_channel();

    let script = async {
        let _ = input.send(ShellEvent::LocateRequested);
        for (dlat, dlon) in CLICK_OFFSETS {
            tokio::time::sleep(driver.period() * 4).await;
            let _ = input.send(ShellEvent::MapClicked {
                lat: center.lat() + dlat,
                lon: center.lon() + dlon,
            });
        }
        tokio::time::sleep(RUN_TIME).await;
        stop.stop();
    };

    let (stats, ()) = tokio::join!(driver.run(&mut shell, events, signal), script);

    let sync = shell.sync();
    let surface = sync.surface();
    tracing::info!(
        ticks = stats.ticks,
        events = stats.events,
        markers = surface.marker_count(),
        relocations = sync.stats().buffer_relocations,
        "demo finished"
    );
    if let Some(engine) = sync.engine() {
        for (slot, point) in engine.coordinates().iter().enumerate() {
            tracing::info!(slot, lat = point.lat(), lon = point.lon(), "final position");
        }
    }
}
