// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for binding, initialization and swapchain creation.
//!
//! Initialization failures never cross the [`SurfaceHost`] boundary as
//! errors: [`SurfaceHost::initialize`] reports them as `false` and keeps the
//! [`InitError`] for inspection. Swapchain failures are returned to the caller
//! as [`SwapchainError`]. Nothing in this crate retries.
//!
//! [`SurfaceHost`]: crate::host::SurfaceHost
//! [`SurfaceHost::initialize`]: crate::host::SurfaceHost::initialize

use core::fmt;

/// A platform status code passed through unchanged from a native call.
///
/// Codes are opaque to this crate. Backends decide what they mean (an
/// `HRESULT`, a `VkResult`, an errno).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeError {
    /// The raw status code reported by the platform.
    pub code: i32,
}

impl NativeError {
    /// Wraps a raw platform status code.
    #[inline]
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

impl fmt::Debug for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeError({:#010x})", self.code)
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native call failed ({:#010x})", self.code)
    }
}

impl core::error::Error for NativeError {}

/// Why a [`SurfaceHost`](crate::host::SurfaceHost) failed to initialize.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum InitError {
    /// The input is not one of the supported native surface kinds, or the
    /// `NativeWindowType` property holds something other than a surface.
    #[error("native object is not a supported surface type")]
    UnsupportedSurfaceType,
    /// No window reference was supplied.
    #[error("no native window reference was supplied")]
    MissingWindowReference,
    /// `RenderSurfaceSize` has a zero, negative or non-finite component.
    #[error("invalid custom render surface size {width}x{height}")]
    InvalidCustomSize {
        /// Requested width, in logical units.
        width: f64,
        /// Requested height, in logical units.
        height: f64,
    },
    /// `RenderSurfaceSize` holds a value that is not a size.
    #[error("custom render surface size is not a size")]
    RenderSurfaceSizeNotASize,
    /// The bounds query or the resize subscription failed on the platform.
    #[error("surface setup failed: {0}")]
    Native(#[from] NativeError),
}

/// Which swapchain parameter was rejected.
///
/// Parameters are checked in declaration order; the first failure wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidArgument {
    /// No graphics device was supplied.
    NullDevice,
    /// No graphics factory was supplied.
    NullFactory,
    /// Requested width is zero.
    ZeroWidth,
    /// Requested height is zero.
    ZeroHeight,
    /// No output slot was supplied to receive the swapchain.
    NullOutput,
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NullDevice => "device is null",
            Self::NullFactory => "factory is null",
            Self::ZeroWidth => "width is zero",
            Self::ZeroHeight => "height is zero",
            Self::NullOutput => "output slot is null",
        })
    }
}

/// Errors from [`SurfaceHost::create_swapchain`](crate::host::SurfaceHost::create_swapchain).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SwapchainError {
    /// A parameter failed validation. No native call was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(InvalidArgument),
    /// The host has not reached the ready state.
    #[error("surface host is not initialized")]
    NotReady,
    /// The graphics factory, the swapchain or the panel reported a failure.
    #[error(transparent)]
    Native(#[from] NativeError),
}

impl From<InvalidArgument> for SwapchainError {
    fn from(arg: InvalidArgument) -> Self {
        Self::InvalidArgument(arg)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn native_error_prints_hex() {
        let err = NativeError::new(0x8007_0057_u32 as i32);
        assert_eq!(err.to_string(), "native call failed (0x80070057)");
        assert_eq!(format!("{err:?}"), "NativeError(0x80070057)");
    }

    #[test]
    fn native_errors_pass_through_swapchain_errors() {
        let err: SwapchainError = NativeError::new(-5).into();
        assert_eq!(err, SwapchainError::Native(NativeError::new(-5)));
        assert_eq!(err.to_string(), NativeError::new(-5).to_string());
    }

    #[test]
    fn invalid_argument_names_the_parameter() {
        let err = SwapchainError::from(InvalidArgument::ZeroHeight);
        assert_eq!(err.to_string(), "invalid argument: height is zero");
    }

    #[test]
    fn custom_size_error_reports_both_components() {
        let err = InitError::InvalidCustomSize {
            width: 0.0,
            height: 480.0,
        };
        assert_eq!(err.to_string(), "invalid custom render surface size 0x480");
    }
}
