// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory native surfaces and graphics objects for exercising
//! `surface_host` without a windowing system or GPU.
//!
//! The mocks record what the host does to them (bounds queries, resize
//! registrations, swapchain creation and attachment) so tests can assert on
//! it, and can be told to fail with a chosen [`NativeError`].
//!
//! ```text
//!   MockDirectWindow ─┐                      ┌─► MockSwapchain (Window)
//!                     ├─► SurfaceHost ─► MockFactory
//!   MockCompositionPanel ┘       ▲           └─► MockSwapchain (Composition)
//!          ▲                     │                     │
//!          └── resize_and_notify ┘    set_swapchain ◄──┘
//! ```

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use kurbo::{Affine, Size};
use parking_lot::Mutex;
use surface_host::error::NativeError;
use surface_host::platform::{
    CompositionPanel, DirectWindow, GraphicsDevice, GraphicsFactory, NativeObject,
    RegistrationToken, ResizableSurface, ResizeHandler, Swapchain,
};
use surface_host::swapchain::SwapchainDescriptor;

/// Returned by [`MockFactory`] when handed a device that is not a
/// [`MockDevice`].
pub const WRONG_DEVICE: NativeError = NativeError::new(0x8007_0057_u32 as i32);

/// Returned by [`MockSwapchain::set_matrix_transform`] on a swapchain that was
/// created against a window.
pub const TRANSFORM_UNSUPPORTED: NativeError = NativeError::new(0x887A_0001_u32 as i32);

/// Erases a mock to the object type a host is constructed from.
#[must_use]
pub fn object<T: NativeObject + 'static>(surface: &Arc<T>) -> Arc<dyn NativeObject> {
    Arc::clone(surface) as Arc<dyn NativeObject>
}

/// Bounds and resize registrations shared by both mock surface kinds.
struct ResizeSource {
    bounds: Mutex<Size>,
    handlers: Mutex<Vec<(RegistrationToken, ResizeHandler)>>,
    next_token: AtomicI64,
    bounds_queries: AtomicUsize,
    unsubscribes: AtomicUsize,
    bounds_failure: Option<NativeError>,
    subscribe_failure: Option<NativeError>,
    resize_before_subscribe: Mutex<Option<Size>>,
}

impl ResizeSource {
    fn new(bounds: Size) -> Self {
        Self {
            bounds: Mutex::new(bounds),
            handlers: Mutex::new(Vec::new()),
            next_token: AtomicI64::new(1),
            bounds_queries: AtomicUsize::new(0),
            unsubscribes: AtomicUsize::new(0),
            bounds_failure: None,
            subscribe_failure: None,
            resize_before_subscribe: Mutex::new(None),
        }
    }

    fn current_bounds(&self) -> Result<Size, NativeError> {
        self.bounds_queries.fetch_add(1, Ordering::Relaxed);
        match self.bounds_failure {
            Some(err) => Err(err),
            None => Ok(*self.bounds.lock()),
        }
    }

    fn subscribe(&self, handler: ResizeHandler) -> Result<RegistrationToken, NativeError> {
        if let Some(err) = self.subscribe_failure {
            return Err(err);
        }
        let racing = self.resize_before_subscribe.lock().take();
        if let Some(bounds) = racing {
            self.resize(bounds);
        }
        let token = RegistrationToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((token, handler));
        Ok(token)
    }

    fn unsubscribe(&self, token: RegistrationToken) {
        self.unsubscribes.fetch_add(1, Ordering::Relaxed);
        self.handlers.lock().retain(|(t, _)| *t != token);
    }

    fn resize(&self, bounds: Size) {
        *self.bounds.lock() = bounds;
        for (_, handler) in self.handlers.lock().iter() {
            handler(bounds);
        }
    }

    fn registrations(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl std::fmt::Debug for ResizeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSource")
            .field("bounds", &*self.bounds.lock())
            .field("registrations", &self.registrations())
            .field("bounds_queries", &self.bounds_queries.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

macro_rules! surface_accessors {
    () => {
        /// Replaces the bounds and calls every registered resize handler.
        pub fn resize_and_notify(&self, bounds: Size) {
            self.source.resize(bounds);
        }

        /// Number of times the bounds were queried.
        #[must_use]
        pub fn bounds_query_count(&self) -> usize {
            self.source.bounds_queries.load(Ordering::Relaxed)
        }

        /// Number of resize registrations currently active.
        #[must_use]
        pub fn registration_count(&self) -> usize {
            self.source.registrations()
        }

        /// Number of unsubscribe calls received.
        #[must_use]
        pub fn unsubscribe_count(&self) -> usize {
            self.source.unsubscribes.load(Ordering::Relaxed)
        }

        /// Makes the bounds query fail with `err`.
        #[must_use]
        pub fn failing_bounds(mut self, err: NativeError) -> Self {
            self.source.bounds_failure = Some(err);
            self
        }

        /// Resizes to `bounds` inside the next registration call, before the
        /// new handler is installed, as if the resize raced the registration.
        #[must_use]
        pub fn resize_before_subscribe(self, bounds: Size) -> Self {
            *self.source.resize_before_subscribe.lock() = Some(bounds);
            self
        }

        /// Makes resize registration fail with `err`.
        #[must_use]
        pub fn failing_subscribe(mut self, err: NativeError) -> Self {
            self.source.subscribe_failure = Some(err);
            self
        }
    };
}

/// A top-level window with settable bounds.
#[derive(Debug)]
pub struct MockDirectWindow {
    source: ResizeSource,
}

impl MockDirectWindow {
    /// Creates a window reporting `bounds`.
    #[must_use]
    pub fn with_bounds(bounds: Size) -> Self {
        Self {
            source: ResizeSource::new(bounds),
        }
    }

    surface_accessors!();
}

impl NativeObject for MockDirectWindow {
    fn as_direct_window(self: Arc<Self>) -> Option<Arc<dyn DirectWindow>> {
        Some(self)
    }
}

impl ResizableSurface for MockDirectWindow {
    fn current_bounds(&self) -> Result<Size, NativeError> {
        self.source.current_bounds()
    }

    fn subscribe_resize(&self, handler: ResizeHandler) -> Result<RegistrationToken, NativeError> {
        self.source.subscribe(handler)
    }

    fn unsubscribe_resize(&self, token: RegistrationToken) {
        self.source.unsubscribe(token);
    }
}

impl DirectWindow for MockDirectWindow {}

/// A composition element that records the swapchain attached to it.
#[derive(Debug)]
pub struct MockCompositionPanel {
    source: ResizeSource,
    attached: Mutex<Option<Arc<dyn Swapchain>>>,
    attach_failure: Option<NativeError>,
}

impl MockCompositionPanel {
    /// Creates a panel reporting `bounds`.
    #[must_use]
    pub fn with_bounds(bounds: Size) -> Self {
        Self {
            source: ResizeSource::new(bounds),
            attached: Mutex::new(None),
            attach_failure: None,
        }
    }

    surface_accessors!();

    /// Makes [`set_swapchain`](CompositionPanel::set_swapchain) fail with `err`.
    #[must_use]
    pub fn failing_attach(mut self, err: NativeError) -> Self {
        self.attach_failure = Some(err);
        self
    }

    /// Returns the swapchain most recently attached, if any.
    #[must_use]
    pub fn attached_swapchain(&self) -> Option<Arc<dyn Swapchain>> {
        self.attached.lock().clone()
    }
}

impl NativeObject for MockCompositionPanel {
    fn as_composition_panel(self: Arc<Self>) -> Option<Arc<dyn CompositionPanel>> {
        Some(self)
    }
}

impl ResizableSurface for MockCompositionPanel {
    fn current_bounds(&self) -> Result<Size, NativeError> {
        self.source.current_bounds()
    }

    fn subscribe_resize(&self, handler: ResizeHandler) -> Result<RegistrationToken, NativeError> {
        self.source.subscribe(handler)
    }

    fn unsubscribe_resize(&self, token: RegistrationToken) {
        self.source.unsubscribe(token);
    }
}

impl CompositionPanel for MockCompositionPanel {
    fn set_swapchain(&self, swapchain: &Arc<dyn Swapchain>) -> Result<(), NativeError> {
        if let Some(err) = self.attach_failure {
            return Err(err);
        }
        *self.attached.lock() = Some(Arc::clone(swapchain));
        Ok(())
    }
}

/// A native object that is not a surface of any kind.
#[derive(Debug, Default)]
pub struct PlainObject;

impl NativeObject for PlainObject {}

/// A graphics device with no state.
#[derive(Debug, Default)]
pub struct MockDevice;

impl GraphicsDevice for MockDevice {}

/// What a [`MockSwapchain`] was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapchainTarget {
    /// Created against a direct window.
    Window,
    /// Created for composition.
    Composition,
}

/// A swapchain that remembers its descriptor and presentation transform.
#[derive(Debug)]
pub struct MockSwapchain {
    descriptor: SwapchainDescriptor,
    target: SwapchainTarget,
    transform: Mutex<Affine>,
    transform_sets: AtomicUsize,
}

impl MockSwapchain {
    /// Creates a swapchain as a factory would.
    #[must_use]
    pub fn new(descriptor: SwapchainDescriptor, target: SwapchainTarget) -> Self {
        Self {
            descriptor,
            target,
            transform: Mutex::new(Affine::IDENTITY),
            transform_sets: AtomicUsize::new(0),
        }
    }

    /// Returns what this swapchain was created for.
    #[must_use]
    pub fn target(&self) -> SwapchainTarget {
        self.target
    }

    /// Number of successful transform updates.
    #[must_use]
    pub fn transform_set_count(&self) -> usize {
        self.transform_sets.load(Ordering::Relaxed)
    }
}

impl Swapchain for MockSwapchain {
    fn descriptor(&self) -> SwapchainDescriptor {
        self.descriptor
    }

    fn set_matrix_transform(&self, transform: Affine) -> Result<(), NativeError> {
        if self.target == SwapchainTarget::Window {
            return Err(TRANSFORM_UNSUPPORTED);
        }
        *self.transform.lock() = transform;
        self.transform_sets.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn matrix_transform(&self) -> Result<Affine, NativeError> {
        Ok(*self.transform.lock())
    }
}

/// A factory producing [`MockSwapchain`]s for [`MockDevice`]s.
#[derive(Debug, Default)]
pub struct MockFactory {
    created: AtomicUsize,
    failure: Option<NativeError>,
    last: Mutex<Option<Arc<MockSwapchain>>>,
}

impl MockFactory {
    /// Creates a factory that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory whose every creation fails with `err`.
    #[must_use]
    pub fn failing(err: NativeError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    /// Number of swapchains created (successful calls only).
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Returns the most recently created swapchain.
    #[must_use]
    pub fn last_created(&self) -> Option<Arc<MockSwapchain>> {
        self.last.lock().clone()
    }

    fn create(
        &self,
        device: &dyn GraphicsDevice,
        desc: &SwapchainDescriptor,
        target: SwapchainTarget,
    ) -> Result<Arc<dyn Swapchain>, NativeError> {
        if let Some(err) = self.failure {
            return Err(err);
        }
        let device: &dyn Any = device;
        if !device.is::<MockDevice>() {
            return Err(WRONG_DEVICE);
        }
        let swapchain = Arc::new(MockSwapchain::new(*desc, target));
        *self.last.lock() = Some(Arc::clone(&swapchain));
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(swapchain)
    }
}

impl GraphicsFactory for MockFactory {
    fn create_swapchain_for_window(
        &self,
        device: &dyn GraphicsDevice,
        _window: &dyn DirectWindow,
        desc: &SwapchainDescriptor,
    ) -> Result<Arc<dyn Swapchain>, NativeError> {
        self.create(device, desc, SwapchainTarget::Window)
    }

    fn create_swapchain_for_composition(
        &self,
        device: &dyn GraphicsDevice,
        desc: &SwapchainDescriptor,
    ) -> Result<Arc<dyn Swapchain>, NativeError> {
        self.create(device, desc, SwapchainTarget::Composition)
    }
}
