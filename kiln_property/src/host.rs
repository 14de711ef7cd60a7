// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-safety policy.
//!
//! A [`PropertyHost`] answers one question for the properties it owns: is it
//! safe to read them right now? Hosts are injected when a property is built,
//! and consulted only for properties that called
//! [`disallow_unsafe_read`](crate::Property::disallow_unsafe_read).

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::display::DisplayName;

/// A shared, long-lived host.
pub type SharedHost = Arc<dyn PropertyHost>;

/// Decides whether reading a property is currently safe.
///
/// Implementations must be cheap and must not touch the property being read.
///
/// Any `Fn() -> Option<String>` closure is a host:
///
/// ```rust
/// use kiln_property::PropertyHost;
///
/// let host = || Some(String::from("the build has not started"));
/// assert_eq!(host.before_read().as_deref(), Some("the build has not started"));
/// ```
pub trait PropertyHost: Send + Sync {
    /// Returns `None` if reading is safe, or the reason it is not.
    ///
    /// The reason is spliced into a sentence: `"Cannot query the value of
    /// <property> because <reason>."`
    fn before_read(&self) -> Option<String>;
}

impl<F> PropertyHost for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    #[inline]
    fn before_read(&self) -> Option<String> {
        self()
    }
}

/// A host that never vetoes a read.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpHost;

impl NoOpHost {
    /// Returns a [`SharedHost`] wrapping `NoOpHost`.
    #[must_use]
    pub fn shared() -> SharedHost {
        Arc::new(Self)
    }
}

impl PropertyHost for NoOpHost {
    fn before_read(&self) -> Option<String> {
        None
    }
}

/// A host that vetoes reads until its owner finishes configuring.
///
/// # Example
///
/// ```rust
/// use kiln_property::{PhaseHost, PropertyHost};
///
/// let host = PhaseHost::new("project ':app'");
/// assert_eq!(
///     host.before_read().as_deref(),
///     Some("configuration of project ':app' has not completed yet")
/// );
///
/// host.complete();
/// assert_eq!(host.before_read(), None);
/// ```
pub struct PhaseHost {
    owner: DisplayName,
    completed: AtomicBool,
}

impl PhaseHost {
    /// Creates a host whose owner has not finished configuring.
    #[must_use]
    pub fn new(owner: impl Into<DisplayName>) -> Self {
        Self {
            owner: owner.into(),
            completed: AtomicBool::new(false),
        }
    }

    /// Marks the owner's configuration as complete. Reads are safe from now on.
    pub fn complete(&self) {
        self.completed.store(true, Ordering::Release);
    }

    /// Returns `true` once [`complete`](Self::complete) has been called.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Returns the owner's display name.
    #[must_use]
    pub fn owner(&self) -> &DisplayName {
        &self.owner
    }
}

impl PropertyHost for PhaseHost {
    fn before_read(&self) -> Option<String> {
        if self.is_complete() {
            None
        } else {
            Some(format!(
                "configuration of {} has not completed yet",
                self.owner
            ))
        }
    }
}

impl fmt::Debug for PhaseHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseHost")
            .field("owner", &self.owner)
            .field("completed", &self.is_complete())
            .finish()
    }
}
