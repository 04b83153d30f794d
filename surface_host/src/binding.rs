// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of opaque inputs to a bound native surface.
//!
//! A host is constructed from a [`SurfaceSource`]: a raw object, a
//! [`PropertyConfiguration`] naming one, or nothing. Resolution probes the
//! object for each [`NativeSurfaceKind`] in priority order and keeps the first
//! match:
//!
//! ```text
//!   SurfaceSource::Object ─────────────┐
//!                                       ▼
//!   SurfaceSource::Properties ─► NativeWindowType ─► probe DirectWindow
//!          │                                              │ no
//!          └─ absent ─► MissingWindowReference            ▼
//!                                                  probe CompositionPanel
//!                                                         │ no
//!                                                         ▼
//!                                                 UnsupportedSurfaceType
//! ```

use alloc::sync::Arc;
use core::fmt;

use crate::config::PropertyConfiguration;
use crate::error::InitError;
use crate::platform::{CompositionPanel, DirectWindow, NativeObject, ResizableSurface};

/// The supported shapes of native surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeSurfaceKind {
    /// A top-level window; swapchains are created against it.
    DirectWindow,
    /// A composition element; swapchains are created for composition and
    /// attached to it, and support presentation-time scaling.
    CompositionPanel,
}

impl NativeSurfaceKind {
    /// Returns `true` if swapchains for this kind accept a scale transform.
    #[inline]
    #[must_use]
    pub const fn supports_scale_transform(self) -> bool {
        matches!(self, Self::CompositionPanel)
    }
}

/// What a [`SurfaceHost`](crate::host::SurfaceHost) is constructed from.
#[derive(Clone, Default)]
pub enum SurfaceSource {
    /// No handle at all.
    #[default]
    Null,
    /// A raw platform object to probe.
    Object(Arc<dyn NativeObject>),
    /// A configuration naming the object under `NativeWindowType`.
    Properties(PropertyConfiguration),
}

impl SurfaceSource {
    /// Returns the configuration, if this source is one.
    #[must_use]
    pub fn properties(&self) -> Option<&PropertyConfiguration> {
        match self {
            Self::Properties(config) => Some(config),
            _ => None,
        }
    }
}

impl fmt::Debug for SurfaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Properties(config) => f.debug_tuple("Properties").field(config).finish(),
        }
    }
}

impl From<Arc<dyn NativeObject>> for SurfaceSource {
    fn from(object: Arc<dyn NativeObject>) -> Self {
        Self::Object(object)
    }
}

impl From<Option<Arc<dyn NativeObject>>> for SurfaceSource {
    fn from(object: Option<Arc<dyn NativeObject>>) -> Self {
        object.map_or(Self::Null, Self::Object)
    }
}

impl From<PropertyConfiguration> for SurfaceSource {
    fn from(config: PropertyConfiguration) -> Self {
        Self::Properties(config)
    }
}

/// A resolved native surface, held alive for as long as the binding exists.
#[derive(Clone)]
pub enum WindowBinding {
    /// Bound to a direct window.
    DirectWindow(Arc<dyn DirectWindow>),
    /// Bound to a composition panel.
    CompositionPanel(Arc<dyn CompositionPanel>),
}

impl WindowBinding {
    /// Resolves `source` to a binding.
    pub fn resolve(source: &SurfaceSource) -> Result<Self, InitError> {
        match source {
            SurfaceSource::Null => Err(InitError::MissingWindowReference),
            SurfaceSource::Object(object) => Self::probe(object),
            SurfaceSource::Properties(config) => Self::probe(config.window_reference()?),
        }
    }

    /// Probes `object` for each surface kind, direct window first.
    pub fn probe(object: &Arc<dyn NativeObject>) -> Result<Self, InitError> {
        if let Some(window) = Arc::clone(object).as_direct_window() {
            return Ok(Self::DirectWindow(window));
        }
        if let Some(panel) = Arc::clone(object).as_composition_panel() {
            return Ok(Self::CompositionPanel(panel));
        }
        log::debug!("{object:?} is neither a direct window nor a composition panel");
        Err(InitError::UnsupportedSurfaceType)
    }

    /// Returns which kind of surface is bound.
    #[must_use]
    pub fn kind(&self) -> NativeSurfaceKind {
        match self {
            Self::DirectWindow(_) => NativeSurfaceKind::DirectWindow,
            Self::CompositionPanel(_) => NativeSurfaceKind::CompositionPanel,
        }
    }

    /// Returns the bound surface's geometry and resize interface.
    #[must_use]
    pub fn surface(&self) -> &dyn ResizableSurface {
        match self {
            Self::DirectWindow(window) => &**window,
            Self::CompositionPanel(panel) => &**panel,
        }
    }
}

impl fmt::Debug for WindowBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectWindow(window) => f.debug_tuple("DirectWindow").field(window).finish(),
            Self::CompositionPanel(panel) => {
                f.debug_tuple("CompositionPanel").field(panel).finish()
            }
        }
    }
}
