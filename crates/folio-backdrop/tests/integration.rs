//! Integration tests for BackdropController
//!
//! These tests drive full mounts against the mock host:
//! - Mount guards and cancellation of in-flight setup
//! - Teardown of listeners, frames, renderers and surfaces
//! - Tier, variant and speed policy as seen by a live effect
//! - Fallback to the static gradient when assets or surfaces fail

use std::cell::RefCell;
use std::rc::Rc;

use folio_backdrop::{
    BackdropController, BackdropSettings, HeadlessBackend, Tier, Variant, MAX_FRAME_DT,
};
use folio_hal::{Capabilities, ContainerId, HostError, HostEvent, PixelSize};
use folio_hal_mock::MockHost;

const PRIMARY: &str = "/effects/clouds.wgsl";
const MIRROR: &str = "/assets/effects/clouds.wgsl";
const CLOUDS_WGSL: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";

fn backdrop() -> ContainerId {
    ContainerId::from("backdrop")
}

fn mock_host() -> Rc<MockHost> {
    let host = MockHost::new();
    host.add_container("backdrop", PixelSize::new(1280, 600));
    Rc::new(host)
}

fn setup(host: &Rc<MockHost>) -> (BackdropController<MockHost>, HeadlessBackend) {
    let backend = HeadlessBackend::new();
    let ctrl = BackdropController::with_defaults(Rc::clone(host), Rc::new(backend.clone()));
    (ctrl, backend)
}

/// Host whose effect resolves to the node graph, so no shader fetch happens
fn network_host() -> Rc<MockHost> {
    let host = mock_host();
    host.set_query_param("bg", "network");
    host
}

// =============================================================================
// Mount Guard Tests
// =============================================================================

#[test]
fn test_double_mount_single_instance() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);

    let first = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    let second = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert_eq!(first, second);
    assert_eq!(ctrl.live_count(), 1);
    assert_eq!(host.surfaces_created(), 1);
    assert_eq!(host.attached_surface_count(&backdrop()), 1);
    assert_eq!(backend.stats().created, 1);
}

#[test]
fn test_mount_while_pending_is_noop() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);

    let inner = Rc::new(RefCell::new(None));
    {
        let ctrl = ctrl.clone();
        let inner = Rc::clone(&inner);
        host.on_delay(move |_| {
            let result = pollster::block_on(ctrl.mount(&backdrop()));
            *inner.borrow_mut() = Some(result);
        });
    }

    let outer = pollster::block_on(ctrl.mount(&backdrop()));
    host.clear_hooks();

    assert!(outer.is_some());
    assert_eq!(*inner.borrow(), Some(None));
    assert_eq!(ctrl.live_count(), 1);
    assert_eq!(backend.stats().created, 1);
}

// =============================================================================
// Teardown Tests
// =============================================================================

#[test]
fn test_destroy_restores_listener_baseline() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let baseline = host.listener_count();

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    // resize, visibility, reduced-motion query, hero intersection
    assert_eq!(host.listener_count(), baseline + 4);
    assert_eq!(host.frame_pending_count(), 1);

    ctrl.destroy(&handle);
    ctrl.destroy(&handle);

    assert_eq!(host.listener_count(), baseline);
    assert_eq!(host.frame_pending_count(), 0);
    assert_eq!(host.total_attached_surfaces(), 0);
    assert_eq!(backend.stats().releases, 1);
    assert!(!ctrl.is_live(&backdrop()));
}

#[test]
fn test_no_frame_after_destroy() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    let draws = backend.stats().draws;

    ctrl.destroy(&handle);
    host.advance_time(16.0);
    assert_eq!(host.run_frame(), 0);
    assert_eq!(
        host.fire_event(HostEvent::Visibility { hidden: false }),
        0
    );
    assert_eq!(backend.stats().draws, draws);
}

#[test]
fn test_stale_handle_ignored() {
    let host = network_host();
    let (ctrl, _) = setup(&host);

    let old = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    ctrl.destroy(&old);
    let new = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    assert_ne!(old, new);

    let speed = ctrl.effective_speed(&new);
    ctrl.set_speed(&old, 5.0);
    ctrl.destroy(&old);

    assert!(ctrl.is_live(&backdrop()));
    assert_eq!(ctrl.effective_speed(&new), speed);
    assert_eq!(ctrl.effective_speed(&old), None);
    assert_eq!(host.attached_surface_count(&backdrop()), 1);
}

#[test]
fn test_unmount_idempotent() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    ctrl.unmount(&backdrop());
    ctrl.unmount(&backdrop());
    ctrl.unmount(&ContainerId::from("nowhere"));

    assert_eq!(host.total_attached_surfaces(), 0);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(backend.stats().releases, 1);
}

// =============================================================================
// Cancellation Tests
// =============================================================================

#[test]
fn test_unmount_during_shader_fetch_attaches_nothing() {
    let host = mock_host();
    host.set_fetch_response(PRIMARY, Ok(CLOUDS_WGSL.to_string()));
    let (ctrl, backend) = setup(&host);
    assert_eq!(ctrl.preferred_variant(), Variant::Clouds);

    {
        let ctrl = ctrl.clone();
        host.on_fetch(move |_| ctrl.unmount(&backdrop()));
    }

    let result = pollster::block_on(ctrl.mount(&backdrop()));
    host.clear_hooks();

    assert_eq!(result, None);
    assert_eq!(host.surfaces_created(), 0);
    assert_eq!(host.total_attached_surfaces(), 0);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(backend.stats().created, 0);
    assert_eq!(host.fallback(&backdrop()), None);
    assert!(!ctrl.is_pending(&backdrop()));
}

#[test]
fn test_unmount_during_init_delay() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    {
        let ctrl = ctrl.clone();
        host.on_delay(move |_| ctrl.unmount(&backdrop()));
    }

    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);
    host.clear_hooks();

    assert_eq!(host.surfaces_created(), 0);
    assert_eq!(backend.stats().created, 0);
}

#[test]
fn test_unmount_during_renderer_creation_releases() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    {
        let ctrl = ctrl.clone();
        backend.on_create(move || ctrl.unmount(&backdrop()));
    }

    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);

    assert_eq!(host.surfaces_created(), 1);
    assert_eq!(host.total_attached_surfaces(), 0);
    assert_eq!(backend.stats().created, 1);
    assert_eq!(backend.stats().releases, 1);
    assert_eq!(backend.stats().draws, 0);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn test_remount_after_cancel() {
    let host = network_host();
    let (ctrl, _) = setup(&host);
    {
        let ctrl = ctrl.clone();
        host.on_delay(move |_| ctrl.unmount(&backdrop()));
    }
    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);
    host.clear_hooks();

    assert!(pollster::block_on(ctrl.mount(&backdrop())).is_some());
    assert_eq!(host.attached_surface_count(&backdrop()), 1);
}

// =============================================================================
// Asset Loading Tests
// =============================================================================

#[test]
fn test_both_sources_fail_falls_back() {
    let host = mock_host();
    let (ctrl, backend) = setup(&host);

    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);

    assert_eq!(host.fetched_urls(), vec![PRIMARY.to_string(), MIRROR.to_string()]);
    assert_eq!(
        host.fallback(&backdrop()).as_deref(),
        Some("linear-gradient(180deg, #1b2438 0%, #121a2c 100%)")
    );
    assert_eq!(host.surfaces_created(), 0);
    assert_eq!(backend.stats().created, 0);
    assert!(!ctrl.is_pending(&backdrop()));
}

#[test]
fn test_mirror_used_when_primary_fails() {
    let host = mock_host();
    host.set_fetch_response(PRIMARY, Err(HostError::AssetLoad(PRIMARY.to_string())));
    host.set_fetch_response(MIRROR, Ok(CLOUDS_WGSL.to_string()));
    let (ctrl, backend) = setup(&host);

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert_eq!(host.fetched_urls(), vec![PRIMARY.to_string(), MIRROR.to_string()]);
    let setup = backend.stats().last_setup.unwrap();
    assert_eq!(setup.shader.as_deref(), Some(CLOUDS_WGSL));
    assert_eq!(ctrl.config(&handle).unwrap().variant, Variant::Clouds);
    assert_eq!(host.fallback(&backdrop()), None);
}

#[test]
fn test_primary_short_circuits_mirror() {
    let host = mock_host();
    host.set_fetch_response(PRIMARY, Ok(CLOUDS_WGSL.to_string()));
    let (ctrl, _) = setup(&host);

    assert!(pollster::block_on(ctrl.mount(&backdrop())).is_some());
    assert_eq!(host.fetched_urls(), vec![PRIMARY.to_string()]);
}

#[test]
fn test_empty_shader_tries_mirror() {
    let host = mock_host();
    host.set_fetch_response(PRIMARY, Ok("   ".to_string()));
    host.set_fetch_response(MIRROR, Ok(CLOUDS_WGSL.to_string()));
    let (ctrl, _) = setup(&host);

    assert!(pollster::block_on(ctrl.mount(&backdrop())).is_some());
    assert_eq!(host.fetched_urls().len(), 2);
}

#[test]
fn test_surface_failure_falls_back() {
    let host = network_host();
    host.fail_surfaces(true);
    let (ctrl, backend) = setup(&host);

    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);
    assert!(host.fallback(&backdrop()).is_some());
    assert_eq!(backend.stats().created, 0);
}

#[test]
fn test_renderer_failure_detaches_surface() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    backend.fail_create(Some(HostError::Renderer("no adapter".to_string())));

    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);
    assert_eq!(host.surfaces_created(), 1);
    assert_eq!(host.total_attached_surfaces(), 0);
    assert!(host.fallback(&backdrop()).is_some());
}

#[test]
fn test_missing_container_falls_back() {
    let host = network_host();
    let (ctrl, _) = setup(&host);
    let missing = ContainerId::from("nowhere");

    assert_eq!(pollster::block_on(ctrl.mount(&missing)), None);
    assert!(host.fallback(&missing).is_some());
}

#[test]
fn test_successful_remount_clears_fallback() {
    let host = network_host();
    host.fail_surfaces(true);
    let (ctrl, _) = setup(&host);
    assert_eq!(pollster::block_on(ctrl.mount(&backdrop())), None);
    assert!(host.fallback(&backdrop()).is_some());

    host.fail_surfaces(false);
    assert!(pollster::block_on(ctrl.mount(&backdrop())).is_some());
    assert_eq!(host.fallback(&backdrop()), None);
}

// =============================================================================
// Tier & Variant Policy Tests
// =============================================================================

#[test]
fn test_mobile_viewport_gets_low_tier() {
    let host = Rc::new(MockHost::with_capabilities(Capabilities {
        viewport_width: Some(375.0),
        viewport_height: Some(812.0),
        device_pixel_ratio: Some(3.0),
        user_agent: Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148".to_string(),
        ),
        prefers_reduced_motion: None,
        heap_limit_bytes: None,
    }));
    host.add_container("backdrop", PixelSize::new(375, 600));
    let (ctrl, backend) = setup(&host);

    assert_eq!(ctrl.detect_tier(), Tier::Low);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    let config = ctrl.config(&handle).unwrap();

    assert_eq!(config.tier, Tier::Low);
    assert_eq!(config.quantity, 2);
    assert_eq!(config.variant, Variant::Network);
    assert_eq!(config.pixel_ratio, 1.0);
    assert_eq!(backend.stats().last_setup.unwrap().size, PixelSize::new(375, 600));
}

#[test]
fn test_network_scene_matches_config() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    let config = ctrl.config(&handle).unwrap();
    let setup = backend.stats().last_setup.unwrap();
    assert_eq!(setup.scene.nodes.len() as u32, config.node_count);
    assert!(setup.shader.is_none());
}

#[test]
fn test_variant_precedence() {
    // Nothing stored: tier default (medium desktop -> clouds)
    let host = mock_host();
    let (ctrl, _) = setup(&host);
    assert_eq!(ctrl.preferred_variant(), Variant::Clouds);

    // Storage beats the tier default
    assert_eq!(ctrl.select_variant("geometry"), Ok(Variant::Geometry));
    assert_eq!(ctrl.preferred_variant(), Variant::Geometry);

    // Unknown query values are skipped
    host.set_query_param("bg", "vanta");
    assert_eq!(ctrl.preferred_variant(), Variant::Geometry);

    // Query beats storage and is not persisted
    host.set_query_param("bg", "Network");
    assert_eq!(ctrl.preferred_variant(), Variant::Network);
    assert_eq!(host.stored("folio.backdrop").as_deref(), Some("geometry"));
}

#[test]
fn test_stored_variant_used_at_mount() {
    let host = mock_host();
    let (ctrl, backend) = setup(&host);
    ctrl.select_variant("geometry").unwrap();

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert_eq!(ctrl.config(&handle).unwrap().variant, Variant::Geometry);
    assert!(host.fetched_urls().is_empty());
    assert!(backend.stats().last_setup.unwrap().scene.nodes.is_empty());
}

#[test]
fn test_custom_settings_keys() {
    let host = mock_host();
    host.set_query_param("effect", "geometry");
    let settings = BackdropSettings::from_json(
        r#"{ "queryParam": "effect", "initDelayMs": 0, "heroOnly": false }"#,
    )
    .unwrap();
    let ctrl = BackdropController::new(
        Rc::clone(&host),
        Rc::new(HeadlessBackend::new()),
        settings,
    )
    .unwrap();

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert_eq!(ctrl.config(&handle).unwrap().variant, Variant::Geometry);
    assert_eq!(host.delays(), vec![0]);
    // no intersection listener without heroOnly
    assert_eq!(host.listener_count(), 3);
}

// =============================================================================
// Speed & Frame Loop Tests
// =============================================================================

#[test]
fn test_reduced_motion_never_animates() {
    let host = Rc::new(MockHost::with_capabilities(Capabilities {
        viewport_width: Some(1280.0),
        viewport_height: Some(800.0),
        device_pixel_ratio: Some(1.0),
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
        prefers_reduced_motion: Some(true),
        heap_limit_bytes: None,
    }));
    host.add_container("backdrop", PixelSize::new(1280, 600));
    let (ctrl, backend) = setup(&host);

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    let config = ctrl.config(&handle).unwrap();

    assert_eq!(config.tier, Tier::Potato);
    assert!(config.reduced_motion);
    assert_eq!(config.speed, 0.0);
    assert_eq!(ctrl.effective_speed(&handle), Some(0.0));
    assert!(!ctrl.is_animating(&handle));
    // the static first frame is still drawn, without pulsing
    assert_eq!(backend.stats().draws, 1);
    assert!(!backend.stats().last_frame.unwrap().pulse);

    ctrl.set_speed(&handle, 1.0);
    assert_eq!(ctrl.effective_speed(&handle), Some(0.0));
    assert_eq!(host.frame_pending_count(), 0);
}

#[test]
fn test_reduced_motion_change_parks_and_resumes() {
    let host = network_host();
    let (ctrl, _) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    let base = ctrl.effective_speed(&handle).unwrap();

    host.fire_event(HostEvent::MediaQuery { matches: true });
    assert_eq!(ctrl.effective_speed(&handle), Some(0.0));
    assert!(!ctrl.is_animating(&handle));

    host.fire_event(HostEvent::MediaQuery { matches: false });
    assert_eq!(ctrl.effective_speed(&handle), Some(base));
    assert!(ctrl.is_animating(&handle));
}

#[test]
fn test_hidden_page_parks_loop() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    assert_eq!(host.frame_pending_count(), 1);

    host.fire_event(HostEvent::Visibility { hidden: true });
    assert_eq!(host.frame_pending_count(), 0);
    assert_eq!(ctrl.effective_speed(&handle), Some(0.0));
    let draws = backend.stats().draws;
    host.advance_time(1000.0);
    assert_eq!(host.run_frame(), 0);
    assert_eq!(backend.stats().draws, draws);

    host.fire_event(HostEvent::Visibility { hidden: false });
    assert_eq!(host.frame_pending_count(), 1);
    assert!(ctrl.is_animating(&handle));
}

#[test]
fn test_mount_while_hidden_starts_parked() {
    let host = network_host();
    host.set_hidden(true);
    let (ctrl, _) = setup(&host);

    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert!(!ctrl.is_animating(&handle));
    host.fire_event(HostEvent::Visibility { hidden: false });
    assert!(ctrl.is_animating(&handle));
}

#[test]
fn test_offscreen_damps_speed() {
    let host = network_host();
    let (ctrl, _) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    ctrl.set_speed(&handle, 0.8);

    host.fire_event(HostEvent::Intersection {
        visible: false,
        ratio: 0.0,
    });
    let damped = ctrl.effective_speed(&handle).unwrap();
    assert!((damped - 0.2).abs() < 1e-6);
    assert!(ctrl.is_animating(&handle));

    host.fire_event(HostEvent::Intersection {
        visible: true,
        ratio: 0.6,
    });
    assert_eq!(ctrl.effective_speed(&handle), Some(0.8));
}

#[test]
fn test_zero_speed_parks_and_resume() {
    let host = network_host();
    let (ctrl, _) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    ctrl.set_speed(&handle, 0.0);
    assert!(!ctrl.is_animating(&handle));
    assert_eq!(host.frame_pending_count(), 0);

    ctrl.set_speed(&handle, 0.5);
    assert!(ctrl.is_animating(&handle));
    assert_eq!(host.frame_pending_count(), 1);
}

#[test]
fn test_frame_loop_advances_animation_time() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    ctrl.set_speed(&handle, 1.0);

    // First frame only establishes the timestamp
    assert_eq!(host.run_frame(), 1);
    assert_eq!(ctrl.animation_time(&handle), Some(0.0));

    host.advance_time(16.0);
    host.run_frame();
    let t = ctrl.animation_time(&handle).unwrap();
    assert!((t - 0.016).abs() < 1e-5);

    // A long gap is clamped to one maximum step
    host.advance_time(10_000.0);
    host.run_frame();
    let jumped = ctrl.animation_time(&handle).unwrap() - t;
    assert!((jumped as f64 - MAX_FRAME_DT).abs() < 1e-5);

    assert_eq!(backend.stats().draws, 4);
    assert_eq!(host.frame_pending_count(), 1);
}

#[test]
fn test_fade_in_reaches_full_opacity() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 0.0);

    host.advance_time(400.0);
    host.run_frame();
    assert!((backend.stats().last_frame.unwrap().opacity - 0.5).abs() < 1e-6);

    host.advance_time(2000.0);
    host.run_frame();
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 1.0);
}

#[test]
fn test_reduced_motion_mount_is_fully_visible() {
    let host = Rc::new(MockHost::with_capabilities(Capabilities {
        viewport_width: Some(1440.0),
        viewport_height: Some(900.0),
        device_pixel_ratio: Some(2.0),
        user_agent: None,
        prefers_reduced_motion: Some(true),
        heap_limit_bytes: None,
    }));
    host.add_container("backdrop", PixelSize::new(1280, 600));
    host.set_query_param("bg", "network");
    let (ctrl, backend) = setup(&host);

    pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    // one still frame, no fade to run it to completion
    let stats = backend.stats();
    assert_eq!(stats.draws, 1);
    assert_eq!(stats.last_frame.unwrap().opacity, 1.0);
    assert_eq!(host.frame_pending_count(), 0);
    assert_eq!(host.fallback(&backdrop()), None);

    host.advance_time(5000.0);
    assert_eq!(host.run_frame(), 0);
    assert_eq!(backend.stats().draws, 1);
}

#[test]
fn test_parking_mid_fade_shows_full_opacity() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    host.advance_time(200.0);
    host.run_frame();
    assert!(backend.stats().last_frame.unwrap().opacity < 1.0);

    ctrl.set_speed(&handle, 0.0);
    assert_eq!(host.frame_pending_count(), 0);
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 1.0);

    // Resuming never fades back out
    ctrl.set_speed(&handle, 0.5);
    host.advance_time(16.0);
    host.run_frame();
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 1.0);
}

#[test]
fn test_hidden_mid_fade_shows_full_opacity() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 0.0);

    host.fire_event(HostEvent::Visibility { hidden: true });
    assert!(!ctrl.is_animating(&handle));
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 1.0);

    // A parked, fully visible effect is not redrawn again
    let draws = backend.stats().draws;
    ctrl.set_speed(&handle, 0.0);
    assert_eq!(backend.stats().draws, draws);
}

#[test]
fn test_mount_while_hidden_is_fully_visible() {
    let host = network_host();
    host.set_hidden(true);
    let (ctrl, backend) = setup(&host);

    pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    assert_eq!(backend.stats().draws, 1);
    assert_eq!(backend.stats().last_frame.unwrap().opacity, 1.0);
}

#[test]
fn test_resize_reconfigures_renderer() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();

    host.add_container("backdrop", PixelSize::new(1920, 700));
    host.fire_event(HostEvent::Resize {
        width: 1920.0,
        height: 1080.0,
    });
    assert_eq!(backend.stats().resizes, 1);

    // Same size again is not a resize
    host.fire_event(HostEvent::Resize {
        width: 1920.0,
        height: 1080.0,
    });
    assert_eq!(backend.stats().resizes, 1);

    host.run_frame();
    let frame = backend.stats().last_frame.unwrap();
    assert_eq!(frame.size, PixelSize::new(1920, 700));
    assert!(ctrl.is_live(handle.container()));
}

#[test]
fn test_resize_while_parked_redraws_once() {
    let host = network_host();
    let (ctrl, backend) = setup(&host);
    let handle = pollster::block_on(ctrl.mount(&backdrop())).unwrap();
    ctrl.set_speed(&handle, 0.0);
    let draws = backend.stats().draws;

    host.add_container("backdrop", PixelSize::new(800, 500));
    host.fire_event(HostEvent::Resize {
        width: 800.0,
        height: 900.0,
    });

    assert_eq!(backend.stats().draws, draws + 1);
    assert_eq!(host.frame_pending_count(), 0);
}

#[test]
fn test_mount_variant_overrides_query() {
    let host = network_host();
    let (ctrl, _) = setup(&host);

    let handle = pollster::block_on(ctrl.mount_variant(&backdrop(), Variant::Geometry)).unwrap();

    assert_eq!(ctrl.config(&handle).unwrap().variant, Variant::Geometry);
    assert_eq!(ctrl.preferred_variant(), Variant::Network);
}
