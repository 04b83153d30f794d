// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property configuration supplied in place of a raw window handle.
//!
//! A [`PropertyConfiguration`] is a read-only key/value snapshot. Two keys are
//! recognized:
//!
//! | Key | Value | Required |
//! |---|---|---|
//! | [`NATIVE_WINDOW_TYPE`] | [`PropertyValue::Object`] naming the surface | yes |
//! | [`RENDER_SURFACE_SIZE`] | [`PropertyValue::Size`], both components > 0 | no |
//!
//! Any other key is carried along untouched. Lookups compare keys exactly.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use kurbo::Size;

use crate::error::InitError;
use crate::platform::NativeObject;

/// Key naming the native surface object to bind to.
pub const NATIVE_WINDOW_TYPE: &str = "NativeWindowType";

/// Key requesting a fixed render resolution that differs from the display.
pub const RENDER_SURFACE_SIZE: &str = "RenderSurfaceSize";

/// A value stored in a [`PropertyConfiguration`].
#[derive(Clone)]
pub enum PropertyValue {
    /// A reference to a platform object.
    Object(Arc<dyn NativeObject>),
    /// A width/height pair in logical units.
    Size(Size),
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Text(String),
}

impl PropertyValue {
    /// Returns the object reference if this value is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Arc<dyn NativeObject>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the size if this value is one.
    #[must_use]
    pub fn as_size(&self) -> Option<Size> {
        match self {
            Self::Size(size) => Some(*size),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Size(size) => write!(f, "Size({}x{})", size.width, size.height),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
        }
    }
}

impl From<Arc<dyn NativeObject>> for PropertyValue {
    fn from(object: Arc<dyn NativeObject>) -> Self {
        Self::Object(object)
    }
}

impl From<Size> for PropertyValue {
    fn from(size: Size) -> Self {
        Self::Size(size)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(String::from(v))
    }
}

/// Read-only key/value lookup used to find the window and render size.
///
/// The host takes this snapshot once at construction and never mutates it.
#[derive(Clone, Debug, Default)]
pub struct PropertyConfiguration {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up `key` by exact match.
    #[must_use]
    pub fn try_get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the object stored under [`NATIVE_WINDOW_TYPE`].
    ///
    /// Fails with [`InitError::MissingWindowReference`] when the key is
    /// absent and [`InitError::UnsupportedSurfaceType`] when it holds a value
    /// that is not an object reference.
    pub fn window_reference(&self) -> Result<&Arc<dyn NativeObject>, InitError> {
        self.try_get(NATIVE_WINDOW_TYPE)
            .ok_or(InitError::MissingWindowReference)?
            .as_object()
            .ok_or(InitError::UnsupportedSurfaceType)
    }

    /// Returns the raw size stored under [`RENDER_SURFACE_SIZE`], if any.
    ///
    /// The components are not range-checked here; the size tracker rejects
    /// non-positive values. A value of the wrong kind fails with
    /// [`InitError::RenderSurfaceSizeNotASize`].
    pub fn render_surface_size(&self) -> Result<Option<Size>, InitError> {
        match self.try_get(RENDER_SURFACE_SIZE) {
            None => Ok(None),
            Some(value) => value
                .as_size()
                .map(Some)
                .ok_or(InitError::RenderSurfaceSizeNotASize),
        }
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
