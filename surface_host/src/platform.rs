// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for the platform objects a surface host talks to.
//!
//! The host never allocates GPU resources or delivers window events itself.
//! Platform integrations provide the following pieces:
//!
//! - **Native objects.** Anything the application hands to the host
//!   implements [`NativeObject`]. Its `as_*` methods are the capability
//!   probes: an object answers `Some` for each surface shape it supports and
//!   `None` otherwise.
//!
//! - **Surfaces.** [`DirectWindow`] (a top-level window the swapchain is
//!   created against) and [`CompositionPanel`] (a composition element the
//!   swapchain is attached to after creation). Both report their bounds and
//!   deliver resize notifications through [`ResizableSurface`].
//!
//! - **Graphics.** A [`GraphicsFactory`] allocates a [`Swapchain`] for a
//!   [`GraphicsDevice`] from a [`SwapchainDescriptor`]. Failures are
//!   [`NativeError`] codes that the host passes through unchanged.
//!
//! # Threading
//!
//! Resize handlers may be invoked from any thread, so every trait here is
//! `Send + Sync`. Handlers only perform atomic stores and never call back
//! into the surface.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use kurbo::{Affine, Size};

use crate::error::NativeError;
use crate::swapchain::SwapchainDescriptor;

/// Callback invoked with the new logical bounds of a resized surface.
pub type ResizeHandler = Box<dyn Fn(Size) + Send + Sync>;

/// Identifies one resize registration on a surface.
///
/// Surfaces assign tokens; the host treats them as opaque and hands each one
/// back exactly once through [`ResizableSurface::unsubscribe_resize`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationToken(pub i64);

impl fmt::Debug for RegistrationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistrationToken({})", self.0)
    }
}

/// An opaque platform object handed to the host.
///
/// The default implementations report no capabilities, so a type that is not
/// a surface only needs an empty `impl`.
pub trait NativeObject: Send + Sync + fmt::Debug {
    /// Probes for the [`DirectWindow`] capability.
    fn as_direct_window(self: Arc<Self>) -> Option<Arc<dyn DirectWindow>> {
        None
    }

    /// Probes for the [`CompositionPanel`] capability.
    fn as_composition_panel(self: Arc<Self>) -> Option<Arc<dyn CompositionPanel>> {
        None
    }
}

/// Geometry and resize notifications shared by every surface kind.
pub trait ResizableSurface: Send + Sync + fmt::Debug {
    /// Returns the surface's current bounds in logical pixels.
    fn current_bounds(&self) -> Result<Size, NativeError>;

    /// Registers `handler` to be called after each resize.
    fn subscribe_resize(&self, handler: ResizeHandler) -> Result<RegistrationToken, NativeError>;

    /// Removes the registration identified by `token`.
    fn unsubscribe_resize(&self, token: RegistrationToken);
}

/// A top-level window that swapchains are created directly against.
///
/// This presentation model has no presentation-time scaling.
pub trait DirectWindow: ResizableSurface {}

/// A composition element that displays a swapchain created for composition.
pub trait CompositionPanel: ResizableSurface {
    /// Makes `swapchain` the content of this panel.
    fn set_swapchain(&self, swapchain: &Arc<dyn Swapchain>) -> Result<(), NativeError>;
}

/// A graphics device that owns swapchain resources.
///
/// The host only forwards devices to the factory. Factories recover their
/// concrete device type by upcasting to [`Any`] and downcasting.
pub trait GraphicsDevice: Any + Send + Sync + fmt::Debug {}

/// Allocates swapchains.
pub trait GraphicsFactory: Send + Sync + fmt::Debug {
    /// Creates a swapchain that presents directly into `window`.
    fn create_swapchain_for_window(
        &self,
        device: &dyn GraphicsDevice,
        window: &dyn DirectWindow,
        desc: &SwapchainDescriptor,
    ) -> Result<Arc<dyn Swapchain>, NativeError>;

    /// Creates a swapchain for use with a composition panel.
    fn create_swapchain_for_composition(
        &self,
        device: &dyn GraphicsDevice,
        desc: &SwapchainDescriptor,
    ) -> Result<Arc<dyn Swapchain>, NativeError>;
}

/// A presentation swapchain produced by a [`GraphicsFactory`].
pub trait Swapchain: Send + Sync + fmt::Debug {
    /// Returns the descriptor the swapchain was created with.
    fn descriptor(&self) -> SwapchainDescriptor;

    /// Sets the transform applied to the back buffer at presentation.
    ///
    /// Only swapchains created for composition support this.
    fn set_matrix_transform(&self, transform: Affine) -> Result<(), NativeError>;

    /// Returns the transform applied at presentation.
    fn matrix_transform(&self) -> Result<Affine, NativeError>;
}
