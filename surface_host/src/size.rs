// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client-size tracking for a bound surface.
//!
//! [`SizeTracker`] queries the surface's bounds once, then follows resize
//! notifications. Two sizes are cached:
//!
//! - the **display size**, which always follows the surface, and
//! - the **client size**, which is the render resolution. It follows the
//!   display size unless a render-size override was configured, in which case
//!   it stays at the override for the life of the tracker.
//!
//! Notifications may arrive on a platform thread while a renderer reads the
//! sizes. Each size lives in a [`SizeCell`], a single `AtomicU64` holding both
//! components, so a reader never sees the width of one size paired with the
//! height of another.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Size;

use crate::binding::WindowBinding;
use crate::error::{InitError, NativeError};
use crate::platform::{RegistrationToken, ResizeHandler};

/// Width and height of a surface in logical pixels.
///
/// Every size produced by this crate is at least 1×1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClientSize {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl ClientSize {
    /// The smallest size a tracked surface can have.
    pub const MIN: Self = Self::new(1, 1);

    /// Creates a size from its components.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Converts platform bounds to whole pixels.
    ///
    /// Components are rounded to the nearest pixel and clamped to at least 1.
    /// Non-finite components clamp to 1 (NaN) or saturate (infinity).
    #[must_use]
    pub fn from_logical(size: Size) -> Self {
        Self::new(to_pixels(size.width), to_pixels(size.height))
    }

    /// Returns this size as platform bounds.
    #[inline]
    #[must_use]
    pub fn to_logical(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Returns the rectangle `(0, 0, width, height)`.
    #[inline]
    #[must_use]
    pub const fn to_rect(self) -> ClientRect {
        ClientRect {
            left: 0,
            top: 0,
            right: self.width,
            bottom: self.height,
        }
    }

    const fn pack(self) -> u64 {
        ((self.width as u64) << 32) | self.height as u64
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "each half of the packed value holds exactly one u32"
    )]
    const fn unpack(bits: u64) -> Self {
        Self::new((bits >> 32) as u32, bits as u32)
    }
}

impl From<ClientSize> for Size {
    fn from(size: ClientSize) -> Self {
        size.to_logical()
    }
}

fn to_pixels(logical: f64) -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int `as` saturates, which is the intended clamp"
    )]
    let px = (logical + 0.5) as u32;
    px.max(1)
}

/// Client-area rectangle anchored at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClientRect {
    /// Left edge; always 0.
    pub left: u32,
    /// Top edge; always 0.
    pub top: u32,
    /// Right edge (the width).
    pub right: u32,
    /// Bottom edge (the height).
    pub bottom: u32,
}

/// A [`ClientSize`] that can be replaced and read atomically from any thread.
pub struct SizeCell(AtomicU64);

impl SizeCell {
    /// Creates a cell holding `size`.
    #[must_use]
    pub const fn new(size: ClientSize) -> Self {
        Self(AtomicU64::new(size.pack()))
    }

    /// Returns the current size.
    #[inline]
    #[must_use]
    pub fn load(&self) -> ClientSize {
        ClientSize::unpack(self.0.load(Ordering::Acquire))
    }

    /// Replaces the current size.
    #[inline]
    pub fn store(&self, size: ClientSize) {
        self.0.store(size.pack(), Ordering::Release);
    }
}

impl fmt::Debug for SizeCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.load();
        write!(f, "SizeCell({}x{})", size.width, size.height)
    }
}

/// Sizes shared between the tracker and its resize handler.
#[derive(Debug)]
struct SharedSizes {
    client: SizeCell,
    display: SizeCell,
    client_follows_display: bool,
}

impl SharedSizes {
    fn apply_resize(&self, display: ClientSize) {
        self.display.store(display);
        if self.client_follows_display {
            self.client.store(display);
        }
        log::trace!("surface resized to {}x{}", display.width, display.height);
    }
}

/// A resize registration that is removed when dropped.
///
/// Holds its own reference to the bound surface, so the unregister call in
/// `Drop` always reaches the surface it registered with, before that reference
/// is released.
pub struct ResizeSubscription {
    binding: WindowBinding,
    token: RegistrationToken,
}

impl ResizeSubscription {
    /// Registers `handler` with the surface behind `binding`.
    pub fn register(binding: &WindowBinding, handler: ResizeHandler) -> Result<Self, NativeError> {
        let token = binding.surface().subscribe_resize(handler)?;
        log::debug!("subscribed to {:?} resizes as {token:?}", binding.kind());
        Ok(Self {
            binding: binding.clone(),
            token,
        })
    }

    /// Returns the token the surface assigned to this registration.
    #[must_use]
    pub fn token(&self) -> RegistrationToken {
        self.token
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("kind", &self.binding.kind())
            .field("token", &self.token)
            .finish()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.binding.surface().unsubscribe_resize(self.token);
        log::debug!(
            "unsubscribed {:?} from {:?} resizes",
            self.token,
            self.binding.kind()
        );
    }
}

/// Owns the cached client and display sizes of one bound surface.
#[derive(Debug)]
pub struct SizeTracker {
    sizes: Arc<SharedSizes>,
    render_override: Option<ClientSize>,
    subscription: ResizeSubscription,
}

impl SizeTracker {
    /// Reads the surface's bounds and starts following its resizes.
    ///
    /// `render_override` is checked first: a zero, negative or non-finite
    /// component fails with [`InitError::InvalidCustomSize`] before the
    /// surface is touched. The bounds are then queried exactly once, before
    /// the resize handler is registered.
    ///
    /// A resize the surface delivers between the bounds query and the
    /// registration is not seen: the cached sizes stay at the queried bounds
    /// until the next notification arrives. Surfaces that coalesce resizes
    /// should notify again after a registration if their bounds changed.
    pub fn initialize_from(
        binding: &WindowBinding,
        render_override: Option<Size>,
    ) -> Result<Self, InitError> {
        let render_override = render_override.map(validate_override).transpose()?;
        let display = ClientSize::from_logical(binding.surface().current_bounds()?);
        let sizes = Arc::new(SharedSizes {
            client: SizeCell::new(render_override.unwrap_or(display)),
            display: SizeCell::new(display),
            client_follows_display: render_override.is_none(),
        });

        let handler_sizes = Arc::clone(&sizes);
        let handler: ResizeHandler = Box::new(move |bounds: Size| {
            handler_sizes.apply_resize(ClientSize::from_logical(bounds));
        });
        let subscription = ResizeSubscription::register(binding, handler)?;

        Ok(Self {
            sizes,
            render_override,
            subscription,
        })
    }

    /// Returns the render resolution.
    #[must_use]
    pub fn client_size(&self) -> ClientSize {
        self.sizes.client.load()
    }

    /// Returns the latest bounds reported by the surface.
    #[must_use]
    pub fn display_size(&self) -> ClientSize {
        self.sizes.display.load()
    }

    /// Returns the configured render-size override, if any.
    #[must_use]
    pub fn render_override(&self) -> Option<ClientSize> {
        self.render_override
    }

    /// Returns the token of the active resize registration.
    #[must_use]
    pub fn registration(&self) -> RegistrationToken {
        self.subscription.token()
    }
}

fn validate_override(size: Size) -> Result<ClientSize, InitError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(ClientSize::from_logical(size))
    } else {
        Err(InitError::InvalidCustomSize {
            width: size.width,
            height: size.height,
        })
    }
}
