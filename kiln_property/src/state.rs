// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle state, one-way flags, and producer bookkeeping.

use kiln_task::TaskId;

/// The lifecycle state of a [`Property`](crate::Property).
///
/// States only move forward (`ImplicitValue -> ExplicitValue -> Final`, or
/// straight to `Final`), except that
/// [`discard_value`](crate::Property::discard_value) returns an unfinalized
/// property to `ImplicitValue`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyState {
    /// No explicit value has been set; the convention is followed.
    ImplicitValue,
    /// A value has been set explicitly; the convention is ignored.
    ExplicitValue,
    /// The value has been realized and can never change.
    Final,
}

bitflags::bitflags! {
    /// One-way policy flags of a [`Property`](crate::Property).
    ///
    /// A property only ever inserts these; nothing clears them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The next successful read finalizes the value.
        const FINALIZE_ON_NEXT_GET = 0b0000_0001;
        /// Mutators fail with [`ChangesDisallowed`](crate::PropertyError::ChangesDisallowed).
        const DISALLOW_CHANGES     = 0b0000_0010;
        /// Reads consult the host first.
        const DISALLOW_UNSAFE_READ = 0b0000_0100;
    }
}

/// Value storage, tagged by lifecycle state.
///
/// The convention only exists before finalization, and the finalized value is
/// the realized one.
#[derive(Clone, Debug)]
pub(crate) enum State<S> {
    Implicit { value: S, convention: S },
    Explicit { value: S, convention: S },
    Final { value: S },
}

impl<S> State<S> {
    pub(crate) fn kind(&self) -> PropertyState {
        match self {
            Self::Implicit { .. } => PropertyState::ImplicitValue,
            Self::Explicit { .. } => PropertyState::ExplicitValue,
            Self::Final { .. } => PropertyState::Final,
        }
    }

    pub(crate) fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }

    pub(crate) fn value(&self) -> &S {
        match self {
            Self::Implicit { value, .. } | Self::Explicit { value, .. } | Self::Final { value } => {
                value
            }
        }
    }

    pub(crate) fn convention(&self) -> Option<&S> {
        match self {
            Self::Implicit { convention, .. } | Self::Explicit { convention, .. } => {
                Some(convention)
            }
            Self::Final { .. } => None,
        }
    }
}

/// The explicitly declared producer of a property's value.
///
/// An explicit producer overrides whatever the supplier reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Producer {
    #[default]
    Unset,
    Explicit(TaskId),
}

impl Producer {
    pub(crate) fn task(self) -> Option<TaskId> {
        match self {
            Self::Unset => None,
            Self::Explicit(task) => Some(task),
        }
    }
}
