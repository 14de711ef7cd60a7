// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiln Task: build-step identity and the dependency-visitor protocol.
//!
//! This crate holds the pieces that `kiln_property` shares with a build
//! scheduler without depending on one:
//!
//! - **Task identity** ([`TaskId`], [`TaskRegistry`]): compact handles for build
//!   steps, interned from their paths (e.g. `":app:compile"`).
//! - **Dependency collection** ([`DependencyContext`], [`TaskDependencySet`]):
//!   the sink a scheduler hands to a value when it wants to know which steps
//!   must run first.
//! - **Producer reporting** ([`TaskDependencySource`]): implemented by anything
//!   whose value may be produced by a build step. Values that wrap other values
//!   forward the query, so the scheduler always reaches the originating step.
//!
//! ## Quick Start
//!
//! ```rust
//! use kiln_task::{
//!     DependencyContext, TaskDependencySet, TaskDependencySource, TaskId, TaskRegistry,
//! };
//!
//! struct Output {
//!     producer: TaskId,
//! }
//!
//! impl TaskDependencySource for Output {
//!     fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
//!         visitor(self.producer);
//!     }
//!
//!     fn is_value_produced_by_task(&self) -> bool {
//!         true
//!     }
//!
//!     fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
//!         context.add(self.producer);
//!         true
//!     }
//! }
//!
//! let mut tasks = TaskRegistry::new();
//! let compile = tasks.register(":app:compile");
//!
//! let jar_input = Output { producer: compile };
//! let mut deps = TaskDependencySet::new();
//! assert!(jar_input.maybe_visit_build_dependencies(&mut deps));
//! assert_eq!(deps.as_slice(), &[compile]);
//! assert_eq!(tasks.path(compile), Some(":app:compile"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod context;
mod id;
mod registry;
mod source;

pub use context::{DependencyContext, TaskDependencySet};
pub use id::TaskId;
pub use registry::TaskRegistry;
pub use source::TaskDependencySource;
