//! # Bridge Scenarios
//!
//! End-to-end checks of engine, sync loop and shell together:
//!
//! 1. **Scenarios**: empty world, one other, user plus other, others only
//! 2. **Properties**: buffer/count agreement, pool growth, slot binding,
//!    user exclusivity, style choice, idempotent user placement
//!
//! Run with: cargo test -p crowdmap --test bridge_scenarios

use std::cell::Cell;

use crowdmap::core::{
    BufferHandle, CoordinateView, EngineFacade, GeoPoint, MovementConfig, PeopleEngine,
};
use crowdmap::render::{MarkerId, MarkerStyle, RecordingSurface, StyleSet, SyncLoop, TickOutcome};
use crowdmap::{CrowdmapConfig, FixedGeolocator, MapShell, ShellEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wraps the real engine and counts buffer reads and user checks.
struct CountingEngine {
    inner: PeopleEngine,
    reads: Cell<usize>,
    user_checks: Cell<usize>,
}

impl CountingEngine {
    fn new() -> Self {
        Self {
            inner: PeopleEngine::default(),
            reads: Cell::new(0),
            user_checks: Cell::new(0),
        }
    }
}

impl EngineFacade for CountingEngine {
    fn set_user_location(&mut self, point: GeoPoint) {
        self.inner.set_user_location(point);
    }

    fn add_other_person(&mut self, point: GeoPoint) {
        self.inner.add_other_person(point);
    }

    fn advance_tick(&mut self) {
        self.inner.advance_tick();
    }

    fn entity_count(&self) -> usize {
        self.inner.entity_count()
    }

    fn user_exists(&self) -> bool {
        self.user_checks.set(self.user_checks.get() + 1);
        self.inner.user_exists()
    }

    fn coordinates(&self) -> CoordinateView<'_> {
        self.reads.set(self.reads.get() + 1);
        self.inner.coordinates()
    }

    fn buffer_handle(&self) -> BufferHandle {
        self.coordinates().handle()
    }
}

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn sync_loop<E: EngineFacade>(engine: E) -> SyncLoop<E, RecordingSurface> {
    SyncLoop::new(Some(engine), RecordingSurface::new(), StyleSet::default())
}

fn marker_style(sync: &SyncLoop<impl EngineFacade, RecordingSurface>, slot: usize) -> MarkerStyle {
    let id = sync.pool().get(slot).unwrap();
    sync.surface().marker(id).unwrap().style.clone().unwrap()
}

fn marker_position(sync: &SyncLoop<impl EngineFacade, RecordingSurface>, slot: usize) -> GeoPoint {
    let id = sync.pool().get(slot).unwrap();
    sync.surface().marker(id).unwrap().position
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn scenario_a_empty_world() {
    let mut sync = sync_loop(CountingEngine::new());
    assert_eq!(sync.engine().unwrap().entity_count(), 0);

    assert_eq!(sync.tick(), TickOutcome::EmptyWorld);

    assert_eq!(sync.engine().unwrap().reads.get(), 0, "empty world must not read the buffer");
    assert!(sync.pool().is_empty());
    assert_eq!(sync.surface().marker_count(), 0);
}

#[test]
fn scenario_b_single_other() {
    let mut sync = sync_loop(PeopleEngine::default());
    sync.engine_mut().unwrap().add_other_person(point(10.0, 20.0));
    assert_eq!(sync.engine().unwrap().entity_count(), 1);

    let outcome = sync.tick();

    assert_eq!(
        outcome,
        TickOutcome::Reconciled {
            entities: 1,
            markers_created: 1,
            user_present: false,
        }
    );
    assert_eq!(sync.surface().marker_count(), 1);
    assert_eq!(marker_style(&sync, 0), MarkerStyle::other());
}

#[test]
fn scenario_c_user_and_other() {
    let user = point(51.5, -0.09);
    let mut sync = sync_loop(PeopleEngine::default());
    {
        let engine = sync.engine_mut().unwrap();
        engine.set_user_location(user);
        engine.add_other_person(point(52.0, 0.1));
        assert_eq!(engine.entity_count(), 2);
    }

    sync.tick();

    assert_eq!(marker_style(&sync, 0), MarkerStyle::user());
    assert_eq!(marker_position(&sync, 0), user, "advance_tick must not move the user");
    assert_eq!(marker_style(&sync, 1), MarkerStyle::other());

    let other = marker_position(&sync, 1);
    let max_step = MovementConfig::default().max_step() + 1e-9;
    assert!((other.lat() - 52.0).abs() <= max_step);
    assert!((other.lon() - 0.1).abs() <= max_step);
}

#[test]
fn scenario_d_others_only() {
    let mut sync = sync_loop(PeopleEngine::default());
    for i in 0..3 {
        sync.engine_mut()
            .unwrap()
            .add_other_person(point(10.0 + f64::from(i), 20.0));
    }
    assert!(!sync.engine().unwrap().user_exists());

    sync.tick();

    assert_eq!(sync.pool().len(), 3);
    for slot in 0..3 {
        assert_eq!(marker_style(&sync, slot), MarkerStyle::other(), "slot {slot}");
    }
}

#[test]
fn scenario_late_user_restyles_slot_zero() {
    let mut sync = sync_loop(PeopleEngine::default());
    sync.engine_mut().unwrap().add_other_person(point(10.0, 20.0));
    sync.tick();
    assert_eq!(marker_style(&sync, 0), MarkerStyle::other());

    // The user goes in front; the marker at slot 0 now shows the user.
    let user = point(40.0, -3.7);
    sync.engine_mut().unwrap().set_user_location(user);
    sync.tick();

    assert_eq!(sync.pool().len(), 2);
    assert_eq!(marker_style(&sync, 0), MarkerStyle::user());
    assert_eq!(marker_position(&sync, 0), user);
    assert_eq!(marker_style(&sync, 1), MarkerStyle::other());
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn user_exists_read_once_per_tick() {
    let mut sync: SyncLoop<CountingEngine, _> =
        SyncLoop::new(None, RecordingSurface::new(), StyleSet::default());
    assert_eq!(sync.tick(), TickOutcome::EngineNotReady);

    sync.attach_engine(CountingEngine::new());
    assert_eq!(sync.tick(), TickOutcome::EmptyWorld);
    assert_eq!(sync.engine().unwrap().user_checks.get(), 0);

    {
        let engine = sync.engine_mut().unwrap();
        engine.set_user_location(point(51.5, -0.09));
        for i in 0..5 {
            engine.add_other_person(point(52.0, f64::from(i)));
        }
    }

    for tick in 1..=4 {
        assert!(sync.tick().is_reconciled());
        assert_eq!(sync.engine().unwrap().user_checks.get(), tick);
    }
}

/// Random interleaving of clicks, user placements and ticks.
#[test]
fn properties_hold_over_random_sessions() {
    for seed in 0..8_u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut sync = sync_loop(CountingEngine::new());
        let mut bound: Vec<MarkerId> = Vec::new();
        let mut last_pool_len = 0;

        for _ in 0..300 {
            match rng.gen_range(0..10) {
                0 => {
                    let before = sync.engine().unwrap().entity_count();
                    let had_user = sync.engine().unwrap().user_exists();
                    let target = point(rng.gen_range(-80.0..80.0), rng.gen_range(-170.0..170.0));
                    sync.engine_mut().unwrap().set_user_location(target);

                    let engine = sync.engine().unwrap();
                    let expected = if had_user { before } else { before + 1 };
                    assert_eq!(engine.entity_count(), expected);
                    assert_eq!(engine.inner.user_location(), Some(target));
                }
                1..=3 => {
                    let at = point(rng.gen_range(-80.0..80.0), rng.gen_range(-170.0..170.0));
                    sync.engine_mut().unwrap().add_other_person(at);
                }
                _ => {
                    sync.tick();
                    let engine = sync.engine().unwrap();
                    let count = engine.entity_count();

                    // Buffer/count agreement.
                    assert_eq!(engine.coordinates().len(), 2 * count);

                    // Pool growth.
                    let pool_len = sync.pool().len();
                    assert!(pool_len >= count);
                    assert!(pool_len >= last_pool_len);
                    last_pool_len = pool_len;

                    // Slot binding.
                    assert_eq!(&sync.pool().as_slice()[..bound.len()], bound.as_slice());
                    bound = sync.pool().as_slice().to_vec();

                    // Style choice and user exclusivity.
                    let user_exists = engine.user_exists();
                    for slot in 0..count {
                        let expected = if slot == 0 && user_exists {
                            MarkerStyle::user()
                        } else {
                            MarkerStyle::other()
                        };
                        assert_eq!(marker_style(&sync, slot), expected, "seed {seed} slot {slot}");
                    }
                    let users = (0..count)
                        .filter(|&slot| marker_style(&sync, slot) == MarkerStyle::user())
                        .count();
                    assert!(users <= 1);

                    // Positions drawn are exactly the engine's.
                    for (slot, at) in engine.coordinates().iter().enumerate() {
                        assert_eq!(marker_position(&sync, slot), at);
                    }
                }
            }
        }
    }
}

#[test]
fn user_placement_is_idempotent() {
    let mut engine = PeopleEngine::default();
    engine.add_other_person(point(1.0, 1.0));
    engine.set_user_location(point(2.0, 2.0));
    engine.set_user_location(point(3.0, 3.0));

    assert_eq!(engine.entity_count(), 2);
    assert_eq!(engine.coordinates().get(0), Some(point(3.0, 3.0)));
    assert_eq!(engine.coordinates().get(1), Some(point(1.0, 1.0)));
}

// ============================================================================
// SHELL
// ============================================================================

#[test]
fn shell_locate_then_clicks() {
    let config = CrowdmapConfig::default();
    let home = point(48.85, 2.35);
    let sync = SyncLoop::new(
        Some(PeopleEngine::new(config.movement)),
        RecordingSurface::new(),
        config.styles.clone(),
    );
    let mut shell = MapShell::new(sync, FixedGeolocator::new(home), &config);

    let mut request = shell.handle(ShellEvent::LocateRequested).unwrap();
    shell.on_location(request.try_recv().unwrap());
    shell.handle(ShellEvent::MapClicked { lat: 48.86, lon: 2.36 });
    shell.handle(ShellEvent::MapClicked { lat: 48.84, lon: 2.34 });

    for _ in 0..20 {
        shell.tick();
    }

    let sync = shell.sync();
    assert_eq!(sync.surface().view(), Some((home, config.locate_zoom)));
    assert_eq!(sync.pool().len(), 3);
    assert_eq!(marker_position(sync, 0), home);
    assert_eq!(marker_style(sync, 0), MarkerStyle::user());
    assert_eq!(sync.stats().reconciled, 20);
}
