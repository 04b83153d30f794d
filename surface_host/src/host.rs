// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`SurfaceHost`] facade.
//!
//! # States
//!
//! ```text
//!   Unbound ──resolve──► Bound ──track + subscribe──► Ready
//!      │                   │
//!      └──────failure──────┴──────────────► Failed (terminal)
//! ```
//!
//! Only a `Ready` host reports sizes or creates swapchains. Dropping a host in
//! any state removes its resize registration (if one was made) and then
//! releases the bound surface.

use alloc::sync::Arc;
use core::mem;

use crate::binding::{NativeSurfaceKind, SurfaceSource, WindowBinding};
use crate::config::PropertyConfiguration;
use crate::error::{InitError, InvalidArgument, SwapchainError};
use crate::platform::{GraphicsDevice, GraphicsFactory, Swapchain};
use crate::scale::ScaleTransform;
use crate::size::{ClientRect, ClientSize, SizeTracker};
use crate::swapchain::{self, PixelFormat, SwapchainBuilder};

/// Lifecycle state of a [`SurfaceHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostState {
    /// Constructed; nothing resolved yet.
    Unbound,
    /// A surface is bound but its size is not yet tracked.
    Bound,
    /// Sizes are tracked and swapchains can be created.
    Ready,
    /// Initialization failed. The host holds no surface.
    Failed,
}

/// Binds a native surface and creates swapchains for it.
///
/// # Example
///
/// ```ignore
/// let config = PropertyConfiguration::new()
///     .with(NATIVE_WINDOW_TYPE, panel)
///     .with(RENDER_SURFACE_SIZE, Size::new(1024.0, 768.0));
/// let mut host = SurfaceHost::new(config);
/// if !host.initialize() {
///     return;
/// }
/// let swapchain = host.create_swapchain(
///     Some(&device),
///     Some(&factory),
///     PixelFormat::Bgra8Unorm,
///     1024,
///     768,
/// )?;
/// ```
#[derive(Debug)]
pub struct SurfaceHost {
    source: SurfaceSource,
    state: HostState,
    failure: Option<InitError>,
    tracker: Option<SizeTracker>,
    binding: Option<WindowBinding>,
}

impl SurfaceHost {
    /// Creates an unbound host for `source`.
    #[must_use]
    pub fn new(source: impl Into<SurfaceSource>) -> Self {
        Self {
            source: source.into(),
            state: HostState::Unbound,
            failure: None,
            tracker: None,
            binding: None,
        }
    }

    /// Binds the surface and starts tracking its size.
    ///
    /// Returns `false` on any failure; [`failure`](Self::failure) then holds
    /// the reason. Calling this again on a ready host returns `true` without
    /// touching the surface; on a failed host it returns `false`.
    pub fn initialize(&mut self) -> bool {
        match self.try_initialize() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("surface host initialization failed: {err}");
                false
            }
        }
    }

    /// Like [`initialize`](Self::initialize), but returns the reason for a
    /// failure.
    pub fn try_initialize(&mut self) -> Result<(), InitError> {
        match self.state {
            HostState::Ready => return Ok(()),
            HostState::Failed => {
                return Err(self.failure.unwrap_or(InitError::UnsupportedSurfaceType));
            }
            HostState::Unbound | HostState::Bound => {}
        }

        let source = mem::take(&mut self.source);
        let result = self.bind_and_track(&source);
        if let Err(err) = result {
            self.tracker = None;
            self.binding = None;
            self.failure = Some(err);
            self.state = HostState::Failed;
        }
        result
    }

    fn bind_and_track(&mut self, source: &SurfaceSource) -> Result<(), InitError> {
        let binding = WindowBinding::resolve(source)?;
        log::debug!("bound {binding:?}");
        self.state = HostState::Bound;

        let render_override = source
            .properties()
            .map(PropertyConfiguration::render_surface_size)
            .transpose()?
            .flatten();
        let tracker = SizeTracker::initialize_from(&binding, render_override)?;

        self.binding = Some(binding);
        self.tracker = Some(tracker);
        self.state = HostState::Ready;
        Ok(())
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> HostState {
        self.state
    }

    /// Returns why initialization failed, if it did.
    #[must_use]
    pub fn failure(&self) -> Option<InitError> {
        self.failure
    }

    /// Returns the bound surface kind once ready.
    #[must_use]
    pub fn kind(&self) -> Option<NativeSurfaceKind> {
        self.binding.as_ref().map(WindowBinding::kind)
    }

    /// Returns the binding once ready.
    #[must_use]
    pub fn binding(&self) -> Option<&WindowBinding> {
        self.binding.as_ref()
    }

    /// Returns the render resolution: the override if one was configured,
    /// else the latest surface bounds.
    #[must_use]
    pub fn client_size(&self) -> Option<ClientSize> {
        self.tracker.as_ref().map(SizeTracker::client_size)
    }

    /// Returns the latest bounds reported by the surface.
    #[must_use]
    pub fn display_size(&self) -> Option<ClientSize> {
        self.tracker.as_ref().map(SizeTracker::display_size)
    }

    /// Returns `(0, 0, width, height)` of the client size, or `None` before
    /// the host is ready.
    #[must_use]
    pub fn client_rect(&self) -> Option<ClientRect> {
        self.client_size().map(ClientSize::to_rect)
    }

    /// Always `false`: these surfaces have no minimized state.
    #[must_use]
    pub fn is_iconic(&self) -> bool {
        false
    }

    /// Returns the scale mapping the render resolution onto the display.
    ///
    /// Identity unless a render-size override is configured. With an override
    /// the display side follows resizes, so call this again after one to get
    /// the transform for the new bounds.
    #[must_use]
    pub fn scale_transform(&self) -> ScaleTransform {
        match &self.tracker {
            Some(tracker) => match tracker.render_override() {
                Some(render) => ScaleTransform::compute(render, tracker.display_size()),
                None => ScaleTransform::IDENTITY,
            },
            None => ScaleTransform::IDENTITY,
        }
    }

    /// Creates a swapchain for the bound surface.
    ///
    /// Parameters are validated in order (device, factory, width, height)
    /// before anything else; the first failure is returned as
    /// [`SwapchainError::InvalidArgument`] and nothing is allocated. A host
    /// that is not ready then fails with [`SwapchainError::NotReady`]. Factory
    /// and swapchain failures pass through as [`SwapchainError::Native`].
    pub fn create_swapchain(
        &self,
        device: Option<&dyn GraphicsDevice>,
        factory: Option<&dyn GraphicsFactory>,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Arc<dyn Swapchain>, SwapchainError> {
        let (device, factory) = swapchain::validate(device, factory, width, height)?;
        self.build_swapchain(device, factory, format, width, height)
    }

    /// Like [`create_swapchain`](Self::create_swapchain), writing the result
    /// into `out`.
    ///
    /// A missing `out` is checked after the other parameters and fails with
    /// [`InvalidArgument::NullOutput`]. `out` is left untouched on failure.
    pub fn create_swapchain_into(
        &self,
        device: Option<&dyn GraphicsDevice>,
        factory: Option<&dyn GraphicsFactory>,
        format: PixelFormat,
        width: u32,
        height: u32,
        out: Option<&mut Option<Arc<dyn Swapchain>>>,
    ) -> Result<(), SwapchainError> {
        let (device, factory) = swapchain::validate(device, factory, width, height)?;
        let out = out.ok_or(InvalidArgument::NullOutput)?;
        *out = Some(self.build_swapchain(device, factory, format, width, height)?);
        Ok(())
    }

    fn build_swapchain(
        &self,
        device: &dyn GraphicsDevice,
        factory: &dyn GraphicsFactory,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Arc<dyn Swapchain>, SwapchainError> {
        let binding = match (&self.binding, self.state) {
            (Some(binding), HostState::Ready) => binding,
            _ => return Err(SwapchainError::NotReady),
        };
        SwapchainBuilder::new(binding, self.scale_transform())
            .build(device, factory, format, width, height)
    }
}

impl Drop for SurfaceHost {
    fn drop(&mut self) {
        // Unregister before the surface reference goes away.
        drop(self.tracker.take());
        drop(self.binding.take());
    }
}
