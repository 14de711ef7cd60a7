// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiln Property: lockable, convention-aware build configuration values.
//!
//! A build needs configuration values that can be set, overridden, or left to
//! a default before the full set of build steps is known, and whose value may
//! come from a step that has not run yet. [`Property`] is that cell.
//!
//! ## Core Concepts
//!
//! ### Lifecycle
//!
//! A property is in one of three [`PropertyState`]s:
//!
//! - **`ImplicitValue`** - nothing set explicitly; the *convention* is used
//! - **`ExplicitValue`** - a value was set; the convention is ignored
//! - **`Final`** - the value was realized and can never change again
//!
//! ### Locking
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`finalize_value`](Property::finalize_value) | realize now, lock forever |
//! | [`disallow_changes`](Property::disallow_changes) | mutators fail, value stays lazy |
//! | [`finalize_value_on_read`](Property::finalize_value_on_read) | next read finalizes |
//! | [`implicit_finalize_value`](Property::implicit_finalize_value) | both of the above |
//! | [`disallow_unsafe_read`](Property::disallow_unsafe_read) | reads ask the [`PropertyHost`]; first allowed read finalizes |
//!
//! These are one-way: nothing unlocks a property.
//!
//! ### Producers
//!
//! A property can name the build step that produces its value
//! ([`attach_producer`](Property::attach_producer)), or inherit that
//! information from its [`ValueSupplier`]. Schedulers query it through
//! [`kiln_task::TaskDependencySource`] without realizing the value.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::fmt;
//! use std::sync::Arc;
//!
//! use kiln_property::{PhaseHost, Property, PropertyError, PropertyState, ValueSupplier};
//! use kiln_task::{TaskDependencySet, TaskDependencySource, TaskRegistry};
//!
//! #[derive(Clone)]
//! struct Fixed(Option<&'static str>);
//!
//! impl TaskDependencySource for Fixed {}
//!
//! impl ValueSupplier<String> for Fixed {
//!     fn absent() -> Self { Fixed(None) }
//!     fn is_present(&self) -> bool { self.0.is_some() }
//!     fn calculate_value(&self) -> Option<String> { self.0.map(String::from) }
//!     fn final_value(&self) -> Self { self.clone() }
//!     fn describe_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "fixed({:?})", self.0)
//!     }
//! }
//!
//! let mut tasks = TaskRegistry::new();
//! let compile = tasks.register(":app:compile");
//! let host = Arc::new(PhaseHost::new("project ':app'"));
//!
//! let mut out_dir: Property<String, Fixed> = Property::new(host.clone());
//! out_dir.attach_display_name("property 'outDir'");
//! out_dir.set_convention(Fixed(Some("build/classes")))?;
//! out_dir.attach_producer(compile)?;
//! out_dir.disallow_unsafe_read();
//!
//! // The scheduler can find the producer without reading the value.
//! let mut deps = TaskDependencySet::new();
//! assert!(out_dir.maybe_visit_build_dependencies(&mut deps));
//! assert_eq!(deps.as_slice(), &[compile]);
//!
//! // Reading during configuration is rejected...
//! assert!(matches!(out_dir.get(), Err(PropertyError::UnsafeRead { .. })));
//!
//! // ...and once configuration completes, the first read pins the value.
//! host.complete();
//! assert_eq!(out_dir.get()?, "build/classes");
//! assert_eq!(out_dir.state(), PropertyState::Final);
//! assert!(out_dir.set_supplier(Fixed(Some("elsewhere"))).is_err());
//! # Ok::<(), PropertyError>(())
//! ```
//!
//! ## Logging
//!
//! Finalization, rejected reads, and other transitions are reported as
//! [`tracing`] events carrying the property's display name.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod builder;
mod display;
mod error;
mod host;
mod property;
mod state;
mod supplier;

pub use builder::PropertyBuilder;
pub use display::DisplayName;
pub use error::PropertyError;
pub use host::{NoOpHost, PhaseHost, PropertyHost, SharedHost};
pub use property::Property;
pub use state::{PropertyFlags, PropertyState};
pub use supplier::ValueSupplier;
