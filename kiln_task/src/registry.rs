// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Task-path registry.
//!
//! Build steps are usually known by a path such as `":app:compile"`, but the
//! property layer only needs a cheap, comparable handle. [`TaskRegistry`]
//! interns paths into [`TaskId`]s and keeps the reverse mapping for
//! diagnostics.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;

use core::hash::BuildHasher;

use crate::id::TaskId;

/// Interns task paths into compact [`TaskId`] handles.
///
/// Paths are stored once. Lookups go through a hash-bucket index
/// (hash -> small list of candidate ids) so the registry does not keep a second
/// copy of each path as a map key.
///
/// # Example
///
/// ```rust
/// use kiln_task::TaskRegistry;
///
/// let mut tasks = TaskRegistry::new();
/// let compile = tasks.register(":app:compile");
/// let jar = tasks.register(":app:jar");
///
/// assert_ne!(compile, jar);
/// assert_eq!(tasks.register(":app:compile"), compile);
/// assert_eq!(tasks.lookup(":app:jar"), Some(jar));
/// assert_eq!(tasks.path(jar), Some(":app:jar"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    paths: Vec<String>,
    buckets: HashMap<u64, Vec<TaskId>>,
    build_hasher: DefaultHashBuilder,
}

impl TaskRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no task has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Registers `path` and returns its [`TaskId`].
    ///
    /// Registering a path that is already known returns the existing id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` tasks are registered.
    pub fn register(&mut self, path: impl Into<String>) -> TaskId {
        let path = path.into();
        if let Some(id) = self.lookup(&path) {
            return id;
        }

        let hash = self.build_hasher.hash_one(path.as_str());
        let id = TaskId::new(
            u32::try_from(self.paths.len()).expect("too many tasks registered for TaskId (u32)"),
        );
        self.paths.push(path);
        self.buckets.entry(hash).or_default().push(id);
        id
    }

    /// Returns the id registered for `path`, if any.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<TaskId> {
        let hash = self.build_hasher.hash_one(path);
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| self.paths[id.as_usize()] == path)
    }

    /// Returns the path of a registered task.
    #[must_use]
    pub fn path(&self, id: TaskId) -> Option<&str> {
        self.paths.get(id.as_usize()).map(String::as_str)
    }

    /// Iterates over all registered tasks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &str)> + '_ {
        self.paths.iter().enumerate().map(|(index, path)| {
            #[expect(clippy::cast_possible_truncation, reason = "bounded by register")]
            let id = TaskId::new(index as u32);
            (id, path.as_str())
        })
    }
}
