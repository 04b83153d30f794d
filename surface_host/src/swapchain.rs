// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swapchain descriptors and creation.
//!
//! Every swapchain the host creates is double-buffered, single-sampled,
//! flip-sequential and stretched. Only the alpha mode depends on the bound
//! surface kind:
//!
//! | Kind | Alpha mode | Creation | Scale transform |
//! |---|---|---|---|
//! | [`DirectWindow`] | [`AlphaMode::Unspecified`] | against the window | not supported |
//! | [`CompositionPanel`] | [`AlphaMode::Ignore`] | for composition, then attached | applied |
//!
//! [`DirectWindow`]: NativeSurfaceKind::DirectWindow
//! [`CompositionPanel`]: NativeSurfaceKind::CompositionPanel

use alloc::sync::Arc;

use bitflags::bitflags;

use crate::binding::{NativeSurfaceKind, WindowBinding};
use crate::error::{InvalidArgument, SwapchainError};
use crate::platform::{GraphicsDevice, GraphicsFactory, Swapchain};
use crate::scale::ScaleTransform;

/// Back-buffer pixel format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Let the factory pick.
    #[default]
    Unknown,
    /// 8-bit RGBA, linear.
    Rgba8Unorm,
    /// 8-bit RGBA, sRGB-encoded.
    Rgba8UnormSrgb,
    /// 8-bit BGRA, linear.
    Bgra8Unorm,
    /// 8-bit BGRA, sRGB-encoded.
    Bgra8UnormSrgb,
    /// 10-bit RGB with 2-bit alpha.
    Rgb10A2Unorm,
    /// 16-bit float RGBA.
    Rgba16Float,
}

bitflags! {
    /// How the swapchain's buffers may be used.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Readable from shaders.
        const SHADER_INPUT = 1 << 4;
        /// Usable as a render target.
        const RENDER_TARGET_OUTPUT = 1 << 5;
        /// Part of a swapchain's back-buffer ring.
        const BACK_BUFFER = 1 << 6;
        /// Shareable across devices.
        const SHARED = 1 << 7;
        /// Read-only.
        const READ_ONLY = 1 << 8;
        /// Contents are discarded after present.
        const DISCARD_ON_PRESENT = 1 << 9;
        /// Usable for unordered access.
        const UNORDERED_ACCESS = 1 << 10;
    }
}

/// How the back buffer is fitted to the output when their sizes differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalingMode {
    /// Stretch to fill the output.
    Stretch,
    /// No scaling; align to the top-left corner.
    None,
    /// Stretch while preserving aspect ratio.
    AspectRatioStretch,
}

/// How buffers are handed to the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentMode {
    /// Blit model, contents discarded.
    Discard,
    /// Blit model, contents preserved.
    Sequential,
    /// Flip model, contents preserved.
    FlipSequential,
    /// Flip model, contents discarded.
    FlipDiscard,
}

/// How the compositor treats back-buffer alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlphaMode {
    /// Platform default.
    Unspecified,
    /// Alpha is premultiplied.
    Premultiplied,
    /// Alpha is straight.
    Straight,
    /// Alpha is ignored; the surface is opaque.
    Ignore,
}

/// Parameters for a swapchain allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapchainDescriptor {
    /// Back-buffer width in pixels.
    pub width: u32,
    /// Back-buffer height in pixels.
    pub height: u32,
    /// Back-buffer format.
    pub format: PixelFormat,
    /// Stereo presentation.
    pub stereo: bool,
    /// Samples per pixel.
    pub sample_count: u32,
    /// Multisample quality level.
    pub sample_quality: u32,
    /// Buffer usage.
    pub usage: BufferUsage,
    /// Number of buffers in the ring.
    pub buffer_count: u32,
    /// Scaling applied when the back buffer and output sizes differ.
    pub scaling: ScalingMode,
    /// Presentation model.
    pub present_mode: PresentMode,
    /// Alpha treatment.
    pub alpha_mode: AlphaMode,
    /// Backend-specific flags.
    pub flags: u32,
}

impl SwapchainDescriptor {
    /// Number of buffers every host-created swapchain uses.
    pub const BUFFER_COUNT: u32 = 2;

    /// Builds the descriptor used for surfaces of `kind`.
    #[must_use]
    pub const fn for_kind(
        kind: NativeSurfaceKind,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let alpha_mode = match kind {
            NativeSurfaceKind::DirectWindow => AlphaMode::Unspecified,
            NativeSurfaceKind::CompositionPanel => AlphaMode::Ignore,
        };
        Self {
            width,
            height,
            format,
            stereo: false,
            sample_count: 1,
            sample_quality: 0,
            usage: BufferUsage::RENDER_TARGET_OUTPUT.union(BufferUsage::BACK_BUFFER),
            buffer_count: Self::BUFFER_COUNT,
            scaling: ScalingMode::Stretch,
            present_mode: PresentMode::FlipSequential,
            alpha_mode,
            flags: 0,
        }
    }
}

/// Checks swapchain parameters in order, returning the first failure.
///
/// The output slot is checked separately by callers that take one.
pub(crate) fn validate<'a>(
    device: Option<&'a dyn GraphicsDevice>,
    factory: Option<&'a dyn GraphicsFactory>,
    width: u32,
    height: u32,
) -> Result<(&'a dyn GraphicsDevice, &'a dyn GraphicsFactory), InvalidArgument> {
    let device = device.ok_or(InvalidArgument::NullDevice)?;
    let factory = factory.ok_or(InvalidArgument::NullFactory)?;
    validate_extent(width, height)?;
    Ok((device, factory))
}

fn validate_extent(width: u32, height: u32) -> Result<(), InvalidArgument> {
    if width == 0 {
        return Err(InvalidArgument::ZeroWidth);
    }
    if height == 0 {
        return Err(InvalidArgument::ZeroHeight);
    }
    Ok(())
}

/// Creates swapchains matching the presentation model of one binding.
#[derive(Debug)]
pub struct SwapchainBuilder<'a> {
    binding: &'a WindowBinding,
    transform: ScaleTransform,
}

impl<'a> SwapchainBuilder<'a> {
    /// Creates a builder for `binding` that applies `transform` where the
    /// surface kind supports it.
    #[must_use]
    pub fn new(binding: &'a WindowBinding, transform: ScaleTransform) -> Self {
        Self { binding, transform }
    }

    /// Returns the descriptor [`build`](Self::build) would request.
    #[must_use]
    pub fn descriptor(&self, format: PixelFormat, width: u32, height: u32) -> SwapchainDescriptor {
        SwapchainDescriptor::for_kind(self.binding.kind(), format, width, height)
    }

    /// Allocates and configures a swapchain.
    ///
    /// A zero `width` or `height` fails with
    /// [`SwapchainError::InvalidArgument`] before the factory is called.
    /// Native failures are returned unchanged as [`SwapchainError::Native`].
    pub fn build(
        &self,
        device: &dyn GraphicsDevice,
        factory: &dyn GraphicsFactory,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Arc<dyn Swapchain>, SwapchainError> {
        validate_extent(width, height)?;
        let desc = self.descriptor(format, width, height);
        let swapchain = match self.binding {
            WindowBinding::DirectWindow(window) => {
                factory.create_swapchain_for_window(device, &**window, &desc)?
            }
            WindowBinding::CompositionPanel(panel) => {
                let swapchain = factory.create_swapchain_for_composition(device, &desc)?;
                swapchain.set_matrix_transform(self.transform.to_affine())?;
                panel.set_swapchain(&swapchain)?;
                swapchain
            }
        };
        log::debug!(
            "created {width}x{height} {:?} swapchain for {:?}",
            desc.format,
            self.binding.kind()
        );
        Ok(swapchain)
    }
}
