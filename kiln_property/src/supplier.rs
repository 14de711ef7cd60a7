// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The value-supplier contract.

use core::fmt;

use kiln_task::TaskDependencySource;

/// What a [`Property`](crate::Property) currently holds.
///
/// A supplier is a fixed value, an absent value, or a value derived from some
/// other deferred computation. The property never computes values itself: it
/// decides *when* a supplier may be read or realized and delegates the rest.
///
/// The producer queries inherited from [`TaskDependencySource`] must not
/// realize the value. Suppliers that wrap another property or supplier should
/// forward them, so that the scheduler sees the step that originally produces
/// the value.
///
/// Suppliers are immutable; a property replaces its supplier rather than
/// mutating it. `Clone` is used when the same supplier becomes both the value
/// and the convention.
pub trait ValueSupplier<T>: TaskDependencySource + Clone {
    /// Returns the supplier used when a property holds nothing.
    ///
    /// This is what [`use_explicit_value`](crate::Property::use_explicit_value)
    /// installs, and what a property without an initial value starts with.
    fn absent() -> Self;

    /// Returns `true` if this supplier currently yields a value.
    fn is_present(&self) -> bool;

    /// Computes the current value, or `None` if there is none.
    fn calculate_value(&self) -> Option<T>;

    /// Realizes the terminal value.
    ///
    /// The returned supplier replaces this one when the property is finalized.
    /// It may trigger upstream deferred computation, and is called at most once
    /// per finalization.
    fn final_value(&self) -> Self;

    /// Writes a description of where the value comes from, without realizing it.
    fn describe_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}
