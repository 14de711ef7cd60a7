// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builder for configured properties.

use core::fmt;
use core::marker::PhantomData;

use kiln_task::TaskId;

use crate::display::DisplayName;
use crate::host::{NoOpHost, SharedHost};
use crate::property::Property;
use crate::state::PropertyFlags;
use crate::supplier::ValueSupplier;

/// Builder for [`Property`].
///
/// Unset options take their defaults:
/// - host: [`NoOpHost`]
/// - initial value: the convention if one is given, else [`ValueSupplier::absent`]
/// - convention: the initial value
/// - no display name, no producer, no policy flags
///
/// # Example
///
/// ```rust
/// use std::fmt;
///
/// use kiln_property::{Property, PropertyBuilder, PropertyState, ValueSupplier};
/// use kiln_task::{TaskDependencySource, TaskId};
///
/// #[derive(Clone)]
/// struct Fixed(Option<u32>);
///
/// impl TaskDependencySource for Fixed {}
///
/// impl ValueSupplier<u32> for Fixed {
///     fn absent() -> Self { Fixed(None) }
///     fn is_present(&self) -> bool { self.0.is_some() }
///     fn calculate_value(&self) -> Option<u32> { self.0 }
///     fn final_value(&self) -> Self { self.clone() }
///     fn describe_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "fixed({:?})", self.0)
///     }
/// }
///
/// let mut jobs: Property<u32, Fixed> = PropertyBuilder::new()
///     .convention(Fixed(Some(4)))
///     .display_name("property 'jobs'")
///     .producer(TaskId::new(0))
///     .finalize_on_read()
///     .build();
///
/// assert_eq!(jobs.get(), Ok(4));
/// assert_eq!(jobs.state(), PropertyState::Final);
/// assert_eq!(jobs.to_string(), "property 'jobs'");
/// ```
pub struct PropertyBuilder<T, S> {
    host: Option<SharedHost>,
    value: Option<S>,
    convention: Option<S>,
    display_name: Option<DisplayName>,
    producer: Option<TaskId>,
    flags: PropertyFlags,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S: ValueSupplier<T>> Default for PropertyBuilder<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: ValueSupplier<T>> PropertyBuilder<T, S> {
    /// Creates a builder with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: None,
            value: None,
            convention: None,
            display_name: None,
            producer: None,
            flags: PropertyFlags::empty(),
            _marker: PhantomData,
        }
    }

    /// Sets the host consulted for read safety.
    #[must_use]
    pub fn host(mut self, host: SharedHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: S) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the convention.
    #[must_use]
    pub fn convention(mut self, convention: S) -> Self {
        self.convention = Some(convention);
        self
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<DisplayName>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Declares the producer task.
    #[must_use]
    pub fn producer(mut self, task: TaskId) -> Self {
        self.producer = Some(task);
        self
    }

    /// Builds the property with changes already disallowed.
    #[must_use]
    pub fn disallow_changes(mut self) -> Self {
        self.flags.insert(PropertyFlags::DISALLOW_CHANGES);
        self
    }

    /// Finalizes the value on the first read.
    #[must_use]
    pub fn finalize_on_read(mut self) -> Self {
        self.flags.insert(PropertyFlags::FINALIZE_ON_NEXT_GET);
        self
    }

    /// Disallows changes and finalizes the value on the first read.
    #[must_use]
    pub fn implicit_finalize(mut self) -> Self {
        self.flags
            .insert(PropertyFlags::DISALLOW_CHANGES | PropertyFlags::FINALIZE_ON_NEXT_GET);
        self
    }

    /// Consults the host on reads and pins the value at the first safe read.
    #[must_use]
    pub fn disallow_unsafe_read(mut self) -> Self {
        self.flags
            .insert(PropertyFlags::DISALLOW_UNSAFE_READ | PropertyFlags::FINALIZE_ON_NEXT_GET);
        self
    }

    /// Builds the property.
    #[must_use]
    pub fn build(self) -> Property<T, S> {
        let host = self.host.unwrap_or_else(NoOpHost::shared);
        let property = match (self.value, self.convention) {
            (Some(value), Some(convention)) => Property::with_convention(host, value, convention),
            (Some(value), None) => Property::from_supplier(host, value),
            (None, Some(convention)) => Property::from_supplier(host, convention),
            (None, None) => Property::new(host),
        };
        let mut property = match self.producer {
            Some(task) => property.with_producer(task),
            None => property,
        };
        if let Some(name) = self.display_name {
            property.attach_display_name(name);
        }
        if self.flags.contains(PropertyFlags::DISALLOW_UNSAFE_READ) {
            property.disallow_unsafe_read();
        }
        if self.flags.contains(PropertyFlags::FINALIZE_ON_NEXT_GET) {
            property.finalize_value_on_read();
        }
        if self.flags.contains(PropertyFlags::DISALLOW_CHANGES) {
            property.disallow_changes();
        }
        property
    }
}

impl<T, S> fmt::Debug for PropertyBuilder<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBuilder")
            .field("has_host", &self.host.is_some())
            .field("has_value", &self.value.is_some())
            .field("has_convention", &self.convention.is_some())
            .field("display_name", &self.display_name)
            .field("producer", &self.producer)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PhaseHost;
    use crate::state::PropertyState;
    use alloc::sync::Arc;
    use kiln_task::{TaskDependencySet, TaskDependencySource};

    #[derive(Clone, Debug, PartialEq)]
    struct Fixed(Option<i32>);

    impl TaskDependencySource for Fixed {}

    impl ValueSupplier<i32> for Fixed {
        fn absent() -> Self {
            Self(None)
        }

        fn is_present(&self) -> bool {
            self.0.is_some()
        }

        fn calculate_value(&self) -> Option<i32> {
            self.0
        }

        fn final_value(&self) -> Self {
            self.clone()
        }

        fn describe_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    #[test]
    fn defaults() {
        let mut p: Property<i32, Fixed> = PropertyBuilder::new().build();
        assert_eq!(p.state(), PropertyState::ImplicitValue);
        assert!(p.flags().is_empty());
        assert_eq!(p.producer(), None);
        assert_eq!(p.is_present(), Ok(false));
    }

    #[test]
    fn convention_only_becomes_value() {
        let mut p: Property<i32, Fixed> = PropertyBuilder::new().convention(Fixed(Some(3))).build();
        assert_eq!(p.get(), Ok(3));
        assert_eq!(p.convention(), Some(&Fixed(Some(3))));
    }

    #[test]
    fn value_and_convention_are_kept_apart() {
        let mut p: Property<i32, Fixed> = PropertyBuilder::new()
            .value(Fixed(Some(1)))
            .convention(Fixed(Some(2)))
            .build();
        assert_eq!(p.get(), Ok(1));
        p.discard_value().unwrap();
        assert_eq!(p.get(), Ok(2));
    }

    #[test]
    fn value_only_is_its_own_convention() {
        let mut p: Property<i32, Fixed> = PropertyBuilder::new().value(Fixed(Some(1))).build();
        p.set_supplier(Fixed(Some(5))).unwrap();
        p.discard_value().unwrap();
        assert_eq!(p.get(), Ok(1));
    }

    #[test]
    fn producer_and_flags_are_applied() {
        let host = Arc::new(PhaseHost::new("project ':app'"));
        let mut p: Property<i32, Fixed> = PropertyBuilder::new()
            .host(host.clone())
            .value(Fixed(Some(9)))
            .producer(TaskId::new(2))
            .disallow_unsafe_read()
            .implicit_finalize()
            .build();

        let mut deps = TaskDependencySet::new();
        assert!(p.maybe_visit_build_dependencies(&mut deps));
        assert_eq!(deps.as_slice(), &[TaskId::new(2)]);
        assert!(p.flags().is_all());

        assert!(matches!(
            p.get(),
            Err(crate::PropertyError::UnsafeRead { .. })
        ));
        host.complete();
        assert_eq!(p.get(), Ok(9));
        assert_eq!(p.state(), PropertyState::Final);
    }

    #[test]
    fn built_producer_rejects_a_different_task() {
        let owner = TaskId::new(4);
        let mut p: Property<i32, Fixed> = PropertyBuilder::new().producer(owner).build();
        assert_eq!(p.producer(), Some(owner));
        assert_eq!(p.attach_producer(owner), Ok(()));
        assert!(matches!(
            p.attach_producer(TaskId::new(5)),
            Err(crate::PropertyError::AmbiguousProducer { existing, .. }) if existing == owner
        ));
    }

    #[test]
    fn disallow_changes_at_build() {
        let mut p: Property<i32, Fixed> = PropertyBuilder::new()
            .value(Fixed(Some(1)))
            .disallow_changes()
            .build();
        assert!(p.set_supplier(Fixed(Some(2))).is_err());
        assert_eq!(p.get(), Ok(1));
    }
}
