// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation-time scaling between render and display resolution.
//!
//! When an application renders at a fixed resolution, the back buffer is
//! mapped onto the display area by an axis-aligned scale with no rotation and
//! no translation. The matrix is expressed as a [`kurbo::Affine`], whose
//! coefficient order `[a, b, c, d, e, f]` matches a 3×2 presentation matrix
//! `[_11, _12, _21, _22, _31, _32]`.

use kurbo::Affine;

use crate::size::ClientSize;

/// Anisotropic scale mapping a render-resolution back buffer onto the display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransform {
    /// Horizontal scale factor (display width / render width).
    pub scale_x: f64,
    /// Vertical scale factor (display height / render height).
    pub scale_y: f64,
}

impl ScaleTransform {
    /// The transform used when render and display sizes agree.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Computes the scale that stretches `render` to cover `display`.
    ///
    /// Both sizes are at least 1×1, so the result is always finite.
    #[must_use]
    pub fn compute(render: ClientSize, display: ClientSize) -> Self {
        if render == display {
            return Self::IDENTITY;
        }
        Self {
            scale_x: f64::from(display.width) / f64::from(render.width),
            scale_y: f64::from(display.height) / f64::from(render.height),
        }
    }

    /// Returns `true` if this transform leaves the back buffer unscaled.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns the transform as a presentation matrix.
    #[inline]
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

impl Default for ScaleTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<ScaleTransform> for Affine {
    fn from(transform: ScaleTransform) -> Self {
        transform.to_affine()
    }
}
