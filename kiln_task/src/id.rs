// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-step identification.

use core::fmt;

/// A compact, copyable handle naming a build step.
///
/// Handles are usually handed out by [`TaskRegistry`](crate::TaskRegistry).
/// Two handles refer to the same task iff they compare equal; this is the
/// identity used when checking whether a value already has a different
/// producer.
///
/// # Example
///
/// ```rust
/// use kiln_task::TaskId;
///
/// let id = TaskId::new(7);
/// assert_eq!(id.index(), 7);
/// assert_eq!(id, TaskId::new(7));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TaskId(u32);

impl TaskId {
    /// Creates a task handle from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns this handle as a `usize`, for tables keyed by task.
    #[must_use]
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TaskId").field(&self.0).finish()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task #{}", self.0)
    }
}
