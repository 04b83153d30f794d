// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end host behavior against the in-memory harness.

use std::sync::Arc;

use kurbo::{Affine, Size};
use surface_host::binding::{NativeSurfaceKind, SurfaceSource};
use surface_host::config::{NATIVE_WINDOW_TYPE, PropertyConfiguration, RENDER_SURFACE_SIZE};
use surface_host::error::{InitError, InvalidArgument, NativeError, SwapchainError};
use surface_host::host::{HostState, SurfaceHost};
use surface_host::platform::{GraphicsDevice, GraphicsFactory, Swapchain};
use surface_host::scale::ScaleTransform;
use surface_host::size::{ClientRect, ClientSize};
use surface_host::swapchain::{AlphaMode, PixelFormat};
use surface_host_harness::{
    MockCompositionPanel, MockDevice, MockDirectWindow, MockFactory, PlainObject,
    SwapchainTarget, object,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn window(width: f64, height: f64) -> Arc<MockDirectWindow> {
    Arc::new(MockDirectWindow::with_bounds(Size::new(width, height)))
}

fn panel(width: f64, height: f64) -> Arc<MockCompositionPanel> {
    Arc::new(MockCompositionPanel::with_bounds(Size::new(width, height)))
}

fn ready_host(source: impl Into<SurfaceSource>) -> SurfaceHost {
    init_logging();
    let mut host = SurfaceHost::new(source);
    assert!(host.initialize(), "host should initialize: {:?}", host.failure());
    host
}

fn rect(right: u32, bottom: u32) -> Option<ClientRect> {
    Some(ClientRect {
        left: 0,
        top: 0,
        right,
        bottom,
    })
}

fn create(
    host: &SurfaceHost,
    factory: &MockFactory,
    width: u32,
    height: u32,
) -> Arc<dyn Swapchain> {
    host.create_swapchain(
        Some(&MockDevice),
        Some(factory),
        PixelFormat::Bgra8Unorm,
        width,
        height,
    )
    .expect("swapchain creation should succeed")
}

#[test]
fn null_source_fails_to_initialize() {
    init_logging();
    let mut host = SurfaceHost::new(SurfaceSource::Null);
    assert!(!host.initialize(), "null source must not bind");
    assert_eq!(host.state(), HostState::Failed);
    assert_eq!(host.failure(), Some(InitError::MissingWindowReference));
}

#[test]
fn non_surface_object_is_unsupported() {
    init_logging();
    let plain: Arc<dyn surface_host::platform::NativeObject> = Arc::new(PlainObject);
    let mut host = SurfaceHost::new(plain);
    assert_eq!(host.try_initialize(), Err(InitError::UnsupportedSurfaceType));
}

#[test]
fn properties_with_non_object_window_type_are_unsupported() {
    init_logging();
    let config = PropertyConfiguration::new().with(NATIVE_WINDOW_TYPE, true);
    let mut host = SurfaceHost::new(config);
    assert_eq!(host.try_initialize(), Err(InitError::UnsupportedSurfaceType));
}

#[test]
fn properties_naming_a_non_surface_object_are_unsupported() {
    init_logging();
    let plain = Arc::new(PlainObject);
    let config = PropertyConfiguration::new().with(NATIVE_WINDOW_TYPE, object(&plain));
    let mut host = SurfaceHost::new(config);
    assert!(!host.initialize(), "a plain object is not a surface");
    assert_eq!(host.failure(), Some(InitError::UnsupportedSurfaceType));
    assert_eq!(host.state(), HostState::Failed);
    assert_eq!(host.kind(), None, "nothing is bound");
    assert_eq!(host.client_rect(), None);
    assert_eq!(Arc::strong_count(&plain), 1, "the object is released");
}

#[test]
fn properties_without_window_type_are_missing_reference() {
    init_logging();
    let config = PropertyConfiguration::new().with(RENDER_SURFACE_SIZE, Size::new(640.0, 480.0));
    let mut host = SurfaceHost::new(config);
    assert_eq!(host.try_initialize(), Err(InitError::MissingWindowReference));
}

#[test]
fn direct_window_reports_its_bounds() {
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    assert_eq!(host.kind(), Some(NativeSurfaceKind::DirectWindow));
    assert_eq!(host.client_rect(), rect(800, 600));
    assert_eq!(window.bounds_query_count(), 1, "bounds are read exactly once");
    assert_eq!(window.registration_count(), 1, "one resize registration");
    assert_eq!(host.scale_transform(), ScaleTransform::IDENTITY);
}

#[test]
fn fractional_bounds_round_to_nearest_pixel() {
    let window = window(799.6, 600.4);
    let host = ready_host(object(&window));
    assert_eq!(host.client_size(), Some(ClientSize::new(800, 600)));
}

#[test]
fn window_override_sets_client_rect() {
    let window = window(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&window))
        .with(RENDER_SURFACE_SIZE, Size::new(640.0, 480.0));
    let host = ready_host(config);
    assert_eq!(host.client_rect(), rect(640, 480));
    assert_eq!(host.display_size(), Some(ClientSize::new(800, 600)));
    assert_eq!(
        window.bounds_query_count(),
        1,
        "bounds are read even with an override"
    );
}

#[test]
fn panel_override_sets_client_rect() {
    let panel = panel(1024.0, 768.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&panel))
        .with(RENDER_SURFACE_SIZE, Size::new(480.0, 800.0));
    let host = ready_host(config);
    assert_eq!(host.kind(), Some(NativeSurfaceKind::CompositionPanel));
    assert_eq!(host.client_rect(), rect(480, 800));
}

#[test]
fn zero_override_fails_before_touching_the_surface() {
    init_logging();
    let window = window(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&window))
        .with(RENDER_SURFACE_SIZE, Size::new(0.0, 480.0));
    let mut host = SurfaceHost::new(config);
    assert_eq!(
        host.try_initialize(),
        Err(InitError::InvalidCustomSize {
            width: 0.0,
            height: 480.0,
        })
    );
    assert_eq!(window.bounds_query_count(), 0, "no bounds query");
    assert_eq!(window.registration_count(), 0, "no registration");
    assert_eq!(host.client_rect(), None);
}

#[test]
fn override_of_wrong_kind_is_invalid() {
    init_logging();
    let window = window(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&window))
        .with(RENDER_SURFACE_SIZE, "640x480");
    let mut host = SurfaceHost::new(config);
    let err = host.try_initialize();
    assert_eq!(
        err,
        Err(InitError::RenderSurfaceSizeNotASize),
        "a text size is not a size"
    );
    assert_eq!(host.failure(), err.err(), "the failure is kept as reported");
    assert_eq!(window.registration_count(), 0, "no registration");
}

#[test]
fn initializing_a_ready_host_is_a_no_op() {
    let window = window(800.0, 600.0);
    let mut host = ready_host(object(&window));
    assert!(host.initialize(), "ready host stays ready");
    assert_eq!(window.bounds_query_count(), 1, "no second bounds query");
    assert_eq!(window.registration_count(), 1, "no second registration");
}

#[test]
fn failed_subscription_leaves_no_registration() {
    init_logging();
    let err = NativeError::new(-7);
    let window = Arc::new(
        MockDirectWindow::with_bounds(Size::new(800.0, 600.0)).failing_subscribe(err),
    );
    let mut host = SurfaceHost::new(object(&window));
    assert_eq!(host.try_initialize(), Err(InitError::Native(err)));
    assert_eq!(host.state(), HostState::Failed);
    assert_eq!(window.registration_count(), 0, "no registration");
    assert_eq!(
        window.unsubscribe_count(),
        0,
        "nothing to unregister on failure"
    );
    drop(host);
    assert_eq!(window.unsubscribe_count(), 0, "drop of a failed host");
    assert_eq!(Arc::strong_count(&window), 1, "surface reference released");
}

#[test]
fn failed_bounds_query_is_reported() {
    init_logging();
    let err = NativeError::new(-3);
    let panel = Arc::new(
        MockCompositionPanel::with_bounds(Size::new(800.0, 600.0)).failing_bounds(err),
    );
    let mut host = SurfaceHost::new(object(&panel));
    assert!(!host.initialize(), "bounds failure must fail init");
    assert_eq!(host.failure(), Some(InitError::Native(err)));
    assert_eq!(panel.registration_count(), 0, "no registration");
}

#[test]
fn swapchain_arguments_are_checked_in_order() {
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    let factory = MockFactory::new();
    let device: &dyn GraphicsDevice = &MockDevice;
    let fac: &dyn GraphicsFactory = &factory;
    let check = |device: Option<&dyn GraphicsDevice>,
                 factory: Option<&dyn GraphicsFactory>,
                 width: u32,
                 height: u32,
                 expected: InvalidArgument| {
        assert_eq!(
            host.create_swapchain(device, factory, PixelFormat::Unknown, width, height).err(),
            Some(SwapchainError::InvalidArgument(expected)),
            "expected {expected:?}"
        );
    };
    check(None, None, 0, 0, InvalidArgument::NullDevice);
    check(Some(device), None, 0, 0, InvalidArgument::NullFactory);
    check(Some(device), Some(fac), 0, 0, InvalidArgument::ZeroWidth);
    check(Some(device), Some(fac), 640, 0, InvalidArgument::ZeroHeight);

    assert_eq!(
        host.create_swapchain_into(
            Some(device),
            Some(fac),
            PixelFormat::Unknown,
            640,
            480,
            None
        ),
        Err(SwapchainError::InvalidArgument(InvalidArgument::NullOutput))
    );
    assert_eq!(
        host.create_swapchain_into(Some(device), None, PixelFormat::Unknown, 640, 480, None),
        Err(SwapchainError::InvalidArgument(InvalidArgument::NullFactory)),
        "output slot is checked last"
    );
    assert_eq!(factory.created_count(), 0, "nothing was allocated");
}

#[test]
fn swapchain_on_unready_host_is_rejected() {
    init_logging();
    let window = window(800.0, 600.0);
    let host = SurfaceHost::new(object(&window));
    let factory = MockFactory::new();
    assert_eq!(
        host.create_swapchain(
            Some(&MockDevice),
            Some(&factory),
            PixelFormat::Unknown,
            640,
            480
        )
        .err(),
        Some(SwapchainError::NotReady)
    );
    assert_eq!(factory.created_count(), 0, "nothing was allocated");
}

#[test]
fn create_swapchain_into_fills_the_slot() {
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    let factory = MockFactory::new();
    let mut slot = None;
    host.create_swapchain_into(
        Some(&MockDevice),
        Some(&factory),
        PixelFormat::Rgba8Unorm,
        800,
        600,
        Some(&mut slot),
    )
    .expect("creation should succeed");
    let swapchain = slot.expect("slot should be filled");
    assert_eq!(swapchain.descriptor().format, PixelFormat::Rgba8Unorm);
}

#[test]
fn direct_window_swapchain_is_created_against_the_window() {
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    let factory = MockFactory::new();
    let swapchain = create(&host, &factory, 800, 600);

    let desc = swapchain.descriptor();
    assert_eq!((desc.width, desc.height), (800, 600));
    assert_eq!(desc.alpha_mode, AlphaMode::Unspecified);
    let created = factory.last_created().expect("factory made a swapchain");
    assert_eq!(created.target(), SwapchainTarget::Window);
    assert_eq!(created.transform_set_count(), 0, "no transform on windows");
}

#[test]
fn window_override_does_not_scale_the_swapchain() {
    let window = window(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&window))
        .with(RENDER_SURFACE_SIZE, Size::new(640.0, 480.0));
    let host = ready_host(config);
    let factory = MockFactory::new();
    let swapchain = create(&host, &factory, 640, 480);
    assert_eq!(swapchain.matrix_transform(), Ok(Affine::IDENTITY));
}

#[test]
fn panel_swapchain_is_attached_with_identity_transform() {
    let panel = panel(800.0, 600.0);
    let host = ready_host(object(&panel));
    let factory = MockFactory::new();
    let swapchain = create(&host, &factory, 800, 600);

    assert_eq!(swapchain.descriptor().alpha_mode, AlphaMode::Ignore);
    assert_eq!(swapchain.matrix_transform(), Ok(Affine::IDENTITY));
    let attached = panel.attached_swapchain().expect("swapchain is attached");
    assert!(
        Arc::ptr_eq(&attached, &swapchain),
        "the created swapchain is the one attached"
    );
    let created = factory.last_created().expect("factory made a swapchain");
    assert_eq!(created.target(), SwapchainTarget::Composition);
}

#[test]
fn panel_override_scales_down_to_display() {
    let panel = panel(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&panel))
        .with(RENDER_SURFACE_SIZE, Size::new(1024.0, 768.0));
    let host = ready_host(config);
    let factory = MockFactory::new();
    let swapchain = create(&host, &factory, 1024, 768);

    let [a, b, c, d, e, f] = swapchain
        .matrix_transform()
        .expect("transform is readable")
        .as_coeffs();
    assert_eq!(a, 800.0 / 1024.0);
    assert_eq!(d, 600.0 / 768.0);
    assert_eq!([b, c, e, f], [0.0; 4], "no shear or translation");
}

#[test]
fn panel_override_scales_up_to_display() {
    let panel = panel(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&panel))
        .with(RENDER_SURFACE_SIZE, Size::new(400.0, 300.0));
    let host = ready_host(config);
    let factory = MockFactory::new();
    let swapchain = create(&host, &factory, 400, 300);
    assert_eq!(swapchain.matrix_transform(), Ok(Affine::scale(2.0)));
}

#[test]
fn native_failures_pass_through() {
    let err = NativeError::new(-22);
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    let factory = MockFactory::failing(err);
    assert_eq!(
        host.create_swapchain(
            Some(&MockDevice),
            Some(&factory),
            PixelFormat::Unknown,
            1,
            1
        )
        .err(),
        Some(SwapchainError::Native(err))
    );

    let panel = Arc::new(
        MockCompositionPanel::with_bounds(Size::new(800.0, 600.0)).failing_attach(err),
    );
    let host = ready_host(object(&panel));
    let factory = MockFactory::new();
    assert_eq!(
        host.create_swapchain(
            Some(&MockDevice),
            Some(&factory),
            PixelFormat::Unknown,
            1,
            1
        )
        .err(),
        Some(SwapchainError::Native(err))
    );
    assert!(panel.attached_swapchain().is_none(), "nothing attached");
}

#[test]
fn resize_updates_client_rect() {
    let window = window(800.0, 600.0);
    let host = ready_host(object(&window));
    window.resize_and_notify(Size::new(1024.0, 768.0));
    assert_eq!(host.client_rect(), rect(1024, 768));
    assert_eq!(host.display_size(), Some(ClientSize::new(1024, 768)));
}

#[test]
fn resize_racing_registration_is_seen_on_next_notification() {
    let window = Arc::new(
        MockDirectWindow::with_bounds(Size::new(800.0, 600.0))
            .resize_before_subscribe(Size::new(1024.0, 768.0)),
    );
    let host = ready_host(object(&window));
    assert_eq!(
        host.client_size(),
        Some(ClientSize::new(800, 600)),
        "sizes stay at the queried bounds"
    );
    assert_eq!(window.bounds_query_count(), 1, "no re-query after registering");

    window.resize_and_notify(Size::new(1024.0, 768.0));
    assert_eq!(host.client_rect(), rect(1024, 768), "next notification syncs");
}

#[test]
fn resize_with_override_only_moves_display() {
    let panel = panel(800.0, 600.0);
    let config = PropertyConfiguration::new()
        .with(NATIVE_WINDOW_TYPE, object(&panel))
        .with(RENDER_SURFACE_SIZE, Size::new(400.0, 300.0));
    let host = ready_host(config);
    panel.resize_and_notify(Size::new(1200.0, 600.0));
    assert_eq!(host.client_rect(), rect(400, 300), "override is authoritative");
    assert_eq!(host.display_size(), Some(ClientSize::new(1200, 600)));
    assert_eq!(host.scale_transform(), ScaleTransform {
        scale_x: 3.0,
        scale_y: 2.0,
    });
}

#[test]
fn drop_removes_the_registration() {
    init_logging();
    let window = window(800.0, 600.0);
    let panel = panel(800.0, 600.0);
    for surface in [object(&window), object(&panel)] {
        let host = ready_host(surface);
        drop(host);
    }
    for (registrations, unsubscribes) in [
        (window.registration_count(), window.unsubscribe_count()),
        (panel.registration_count(), panel.unsubscribe_count()),
    ] {
        assert_eq!(registrations, 0, "registration removed on drop");
        assert_eq!(unsubscribes, 1, "unregistered exactly once");
    }
    assert_eq!(Arc::strong_count(&window), 1, "window released");
    assert_eq!(Arc::strong_count(&panel), 1, "panel released");

    // Late notifications reach nobody.
    window.resize_and_notify(Size::new(10.0, 10.0));
}

#[test]
fn is_iconic_is_always_false() {
    let window = window(800.0, 600.0);
    let panel = panel(800.0, 600.0);
    assert!(!ready_host(object(&window)).is_iconic(), "window");
    assert!(!ready_host(object(&panel)).is_iconic(), "panel");
}
