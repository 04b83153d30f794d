// Copyright 2026 the Surface Host Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binds an opaque native surface to a rendering device.
//!
//! `surface_host` takes whatever the application hands it (a window object, a
//! composition panel, or a property set naming one), works out which kind of
//! surface it is, tracks its client size and creates swapchains shaped for
//! that surface's presentation model. It is `no_std` compatible (with
//! `alloc`); platform integrations plug in through the traits in
//! [`platform`].
//!
//! # Architecture
//!
//! ```text
//!   SurfaceSource (object / properties / null)
//!       │
//!       ▼
//!   WindowBinding::resolve() ──► DirectWindow | CompositionPanel
//!       │
//!       ▼
//!   SizeTracker ◄── resize notifications (any thread)
//!       │   client size, display size
//!       ▼
//!   ScaleTransform::compute() ──► SwapchainBuilder::build()
//!                                        │
//!                                        ▼
//!                         GraphicsFactory ──► Swapchain
//! ```
//!
//! **[`host`]**: The [`SurfaceHost`](host::SurfaceHost) facade and its
//! `Unbound → Bound → Ready | Failed` lifecycle.
//!
//! **[`binding`]**: Capability probing of native objects. Direct windows are
//! preferred over composition panels when an object is both.
//!
//! **[`config`]**: The `NativeWindowType` / `RenderSurfaceSize` property
//! lookup.
//!
//! **[`size`]**: Client and display sizes, stored atomically and updated
//! from resize notifications through an RAII registration.
//!
//! **[`scale`]**: The render-to-display scale applied to composition
//! swapchains when a fixed render size is configured.
//!
//! **[`swapchain`]**: Descriptors, parameter validation and per-kind creation.
//!
//! **[`platform`]**: Traits implemented by native integrations.
//!
//! **[`error`]**: Initialization and swapchain error types.
//!
//! # Logging
//!
//! Lifecycle events are reported through the [`log`] facade: binding and
//! registration at `debug`, initialization failures at `warn`, individual
//! resizes at `trace`. No logger is installed by this crate.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod binding;
pub mod config;
pub mod error;
pub mod host;
pub mod platform;
pub mod scale;
pub mod size;
pub mod swapchain;
