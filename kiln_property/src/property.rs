// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property cell.

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use kiln_task::{DependencyContext, TaskDependencySource, TaskId};
use tracing::{debug, trace};

use crate::display::DisplayName;
use crate::error::PropertyError;
use crate::host::SharedHost;
use crate::state::{Producer, PropertyFlags, PropertyState, State};
use crate::supplier::ValueSupplier;

/// A configuration value that stays mutable until something locks it.
///
/// A property holds a [`ValueSupplier`] and a fallback *convention*. Until a
/// value is set explicitly, the convention is what the property reports. Once
/// finalized, the realized value is pinned and every mutator fails.
///
/// Reads ([`is_present`](Self::is_present), [`get`](Self::get), ...) pass
/// through a gate that may consult the [`PropertyHost`](crate::PropertyHost)
/// and may finalize the value. Producer queries
/// ([`TaskDependencySource`]) never pass through the gate, so a scheduler can
/// discover the step that produces a value without realizing it.
///
/// A property is owned and driven by one configuration sequence at a time. It
/// performs no locking of its own; once final, it is a plain immutable value.
///
/// See the [crate documentation](crate) for an example.
pub struct Property<T, S> {
    host: SharedHost,
    state: State<S>,
    flags: PropertyFlags,
    producer: Producer,
    display_name: Option<DisplayName>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S: ValueSupplier<T>> Property<T, S> {
    /// Creates a property that holds nothing and has no convention.
    #[must_use]
    pub fn new(host: SharedHost) -> Self {
        Self::with_convention(host, S::absent(), S::absent())
    }

    /// Creates a property whose initial value is also its convention.
    ///
    /// Discarding an explicit value later returns to `initial`.
    #[must_use]
    pub fn from_supplier(host: SharedHost, initial: S) -> Self {
        let convention = initial.clone();
        Self::with_convention(host, initial, convention)
    }

    /// Creates a property with separate initial value and convention.
    ///
    /// The property starts in [`PropertyState::ImplicitValue`] holding
    /// `initial`. Setting a convention or discarding a value switches to the
    /// convention.
    #[must_use]
    pub fn with_convention(host: SharedHost, initial: S, convention: S) -> Self {
        Self {
            host,
            state: State::Implicit {
                value: initial,
                convention,
            },
            flags: PropertyFlags::empty(),
            producer: Producer::Unset,
            display_name: None,
            _marker: PhantomData,
        }
    }

    /// Sets the producer of a property that has none yet.
    pub(crate) fn with_producer(mut self, task: TaskId) -> Self {
        debug_assert!(
            self.producer.task().is_none(),
            "with_producer on a property that already has a producer"
        );
        self.producer = Producer::Explicit(task);
        self
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PropertyState {
        self.state.kind()
    }

    /// Returns the one-way flags set so far.
    #[must_use]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Returns the current supplier without running the read gate.
    ///
    /// This is for wrappers and diagnostics; use [`get`](Self::get) to read.
    #[must_use]
    pub fn supplier(&self) -> &S {
        self.state.value()
    }

    /// Returns the convention, or `None` once the property is final.
    #[must_use]
    pub fn convention(&self) -> Option<&S> {
        self.state.convention()
    }

    /// Returns the explicitly attached producer, if any.
    #[must_use]
    pub fn producer(&self) -> Option<TaskId> {
        self.producer.task()
    }

    // ------------------------------------------------------------------
    // Display names
    // ------------------------------------------------------------------

    /// Attaches the name used in diagnostics for this property.
    pub fn attach_display_name(&mut self, name: impl Into<DisplayName>) {
        self.display_name = Some(name.into());
    }

    /// Returns the attached name, if any.
    #[must_use]
    pub fn declared_display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Returns the attached name, or `"this property"`.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        const DEFAULT: &DisplayName = &DisplayName::THIS_PROPERTY;
        self.display_name.as_ref().unwrap_or(DEFAULT)
    }

    /// Returns the attached name, or `"a property"`, for validation messages.
    #[must_use]
    pub fn validation_display_name(&self) -> &DisplayName {
        const DEFAULT: &DisplayName = &DisplayName::A_PROPERTY;
        self.display_name.as_ref().unwrap_or(DEFAULT)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Returns `true` if the property has a value.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnsafeRead`] if the host vetoes the read.
    pub fn is_present(&mut self) -> Result<bool, PropertyError> {
        self.before_read()?;
        Ok(self.state.value().is_present())
    }

    /// Returns the value.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnsafeRead`] if the host vetoes the read,
    /// or [`PropertyError::MissingValue`] if there is no value.
    pub fn get(&mut self) -> Result<T, PropertyError> {
        self.before_read()?;
        self.state
            .value()
            .calculate_value()
            .ok_or_else(|| PropertyError::MissingValue {
                property: self.display_name().clone(),
            })
    }

    /// Returns the value, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnsafeRead`] if the host vetoes the read.
    pub fn get_or_none(&mut self) -> Result<Option<T>, PropertyError> {
        self.before_read()?;
        Ok(self.state.value().calculate_value())
    }

    /// Returns the value, or `default` if there is none.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnsafeRead`] if the host vetoes the read.
    pub fn get_or_else(&mut self, default: T) -> Result<T, PropertyError> {
        Ok(self.get_or_none()?.unwrap_or(default))
    }

    /// Runs before every observation of the value.
    ///
    /// A final property passes straight through. Otherwise the host is asked
    /// for a veto if unsafe reads are disallowed, and a pending
    /// finalize-on-read is carried out. A vetoed read changes nothing.
    fn before_read(&mut self) -> Result<(), PropertyError> {
        if self.state.is_final() {
            return Ok(());
        }
        if self.flags.contains(PropertyFlags::DISALLOW_UNSAFE_READ)
            && let Some(reason) = self.host.before_read()
        {
            debug!(property = %self.display_name(), %reason, "unsafe read rejected");
            return Err(PropertyError::UnsafeRead {
                property: self.display_name().clone(),
                reason,
            });
        }
        if self.flags.contains(PropertyFlags::FINALIZE_ON_NEXT_GET) {
            self.realize();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Sets the value explicitly. The convention is ignored from now on.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::Finalized`] or
    /// [`PropertyError::ChangesDisallowed`] if the property is locked.
    pub fn set_supplier(&mut self, supplier: S) -> Result<(), PropertyError> {
        self.assert_can_mutate()?;
        let (_, convention) = self.take_pending();
        self.state = State::Explicit {
            value: supplier,
            convention,
        };
        trace!(property = %self.display_name(), "explicit value set");
        Ok(())
    }

    /// Replaces the convention.
    ///
    /// If no explicit value has been set, the property follows the new
    /// convention immediately.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::Finalized`] or
    /// [`PropertyError::ChangesDisallowed`] if the property is locked.
    pub fn set_convention(&mut self, convention: S) -> Result<(), PropertyError> {
        self.assert_can_mutate()?;
        match &mut self.state {
            State::Implicit {
                value,
                convention: current,
            } => {
                *value = convention.clone();
                *current = convention;
            }
            State::Explicit {
                convention: current,
                ..
            } => *current = convention,
            State::Final { .. } => {}
        }
        trace!(property = %self.display_name(), "convention set");
        Ok(())
    }

    /// Stops following the convention without setting a value.
    ///
    /// If no explicit value has been set, the property now explicitly holds
    /// nothing ([`ValueSupplier::absent`]). An explicit value is kept.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::Finalized`] or
    /// [`PropertyError::ChangesDisallowed`] if the property is locked.
    pub fn use_explicit_value(&mut self) -> Result<(), PropertyError> {
        self.assert_can_mutate()?;
        if let State::Implicit { .. } = self.state {
            let (_, convention) = self.take_pending();
            self.state = State::Explicit {
                value: S::absent(),
                convention,
            };
        }
        Ok(())
    }

    /// Discards any explicit value and follows the convention again.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::Finalized`] or
    /// [`PropertyError::ChangesDisallowed`] if the property is locked.
    pub fn discard_value(&mut self) -> Result<(), PropertyError> {
        self.assert_can_mutate()?;
        let (_, convention) = self.take_pending();
        self.state = State::Implicit {
            value: convention.clone(),
            convention,
        };
        trace!(property = %self.display_name(), "value discarded");
        Ok(())
    }

    /// Fails if the property may no longer be mutated.
    fn assert_can_mutate(&self) -> Result<(), PropertyError> {
        if self.state.is_final() {
            Err(PropertyError::Finalized {
                property: self.display_name().clone(),
            })
        } else if self.flags.contains(PropertyFlags::DISALLOW_CHANGES) {
            Err(PropertyError::ChangesDisallowed {
                property: self.display_name().clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Moves the value and convention out of an unfinalized state.
    ///
    /// Leaves an absent placeholder that the caller must overwrite.
    fn take_pending(&mut self) -> (S, S) {
        debug_assert!(!self.state.is_final(), "take_pending on a final property");
        let placeholder = State::Final { value: S::absent() };
        match mem::replace(&mut self.state, placeholder) {
            State::Implicit { value, convention } | State::Explicit { value, convention } => {
                (value, convention)
            }
            State::Final { value } => (value, S::absent()),
        }
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    /// Realizes the value now and locks the property forever.
    ///
    /// Calling this on a final property does nothing.
    pub fn finalize_value(&mut self) {
        if !self.state.is_final() {
            self.realize();
        }
        self.flags.insert(PropertyFlags::DISALLOW_CHANGES);
    }

    /// Makes every later mutator fail, without realizing the value.
    pub fn disallow_changes(&mut self) {
        self.flags.insert(PropertyFlags::DISALLOW_CHANGES);
    }

    /// Finalizes the value on the next read rather than now.
    pub fn finalize_value_on_read(&mut self) {
        self.flags.insert(PropertyFlags::FINALIZE_ON_NEXT_GET);
    }

    /// Disallows changes now and finalizes the value on the next read.
    pub fn implicit_finalize_value(&mut self) {
        self.flags
            .insert(PropertyFlags::DISALLOW_CHANGES | PropertyFlags::FINALIZE_ON_NEXT_GET);
    }

    /// Consults the host on every read, and pins the value at the first read
    /// the host allows.
    pub fn disallow_unsafe_read(&mut self) {
        self.flags
            .insert(PropertyFlags::DISALLOW_UNSAFE_READ | PropertyFlags::FINALIZE_ON_NEXT_GET);
    }

    /// Replaces the value with its realized form and drops the convention.
    fn realize(&mut self) {
        let value = self.state.value().final_value();
        self.state = State::Final { value };
        self.flags.insert(PropertyFlags::DISALLOW_CHANGES);
        debug!(property = %self.display_name(), "value finalized");
    }

    // ------------------------------------------------------------------
    // Producers
    // ------------------------------------------------------------------

    /// Declares `task` as the build step that produces this value.
    ///
    /// Attaching the same task again is a no-op.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::AmbiguousProducer`] if a different task is
    /// already attached.
    pub fn attach_producer(&mut self, task: TaskId) -> Result<(), PropertyError> {
        match self.producer {
            Producer::Explicit(existing) if existing != task => {
                Err(PropertyError::AmbiguousProducer {
                    property: self.display_name().clone(),
                    existing,
                    rejected: task,
                })
            }
            _ => {
                self.producer = Producer::Explicit(task);
                trace!(property = %self.display_name(), %task, "producer attached");
                Ok(())
            }
        }
    }
}

impl<T, S: ValueSupplier<T>> TaskDependencySource for Property<T, S> {
    fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
        match self.producer {
            Producer::Explicit(task) => visitor(task),
            Producer::Unset => self.state.value().visit_producer_tasks(visitor),
        }
    }

    fn is_value_produced_by_task(&self) -> bool {
        match self.producer {
            Producer::Explicit(_) => true,
            Producer::Unset => self.state.value().is_value_produced_by_task(),
        }
    }

    fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
        match self.producer {
            Producer::Explicit(task) => {
                context.add(task);
                true
            }
            Producer::Unset => self.state.value().maybe_visit_build_dependencies(context),
        }
    }
}

/// Shows the attached display name, or describes the supplier. Never realizes
/// the value.
impl<T, S: ValueSupplier<T>> fmt::Display for Property<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => fmt::Display::fmt(name, f),
            None => self.state.value().describe_contents(f),
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Property<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("state", &self.state)
            .field("flags", &self.flags)
            .field("producer", &self.producer)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}
