// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency collection.

use core::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::id::TaskId;

/// Sink for build dependencies discovered while walking values.
///
/// A scheduler passes a context to
/// [`TaskDependencySource::maybe_visit_build_dependencies`](crate::TaskDependencySource::maybe_visit_build_dependencies)
/// and receives every task that has to run before the value can be realized.
///
/// Any `FnMut(TaskId)` closure is a context:
///
/// ```rust
/// use kiln_task::{DependencyContext, TaskId};
///
/// let mut seen = Vec::new();
/// let mut context = |task: TaskId| seen.push(task);
/// context.add(TaskId::new(1));
/// assert_eq!(seen, [TaskId::new(1)]);
/// ```
pub trait DependencyContext {
    /// Records that `task` must run first.
    fn add(&mut self, task: TaskId);
}

impl<F> DependencyContext for F
where
    F: FnMut(TaskId),
{
    #[inline]
    fn add(&mut self, task: TaskId) {
        self(task);
    }
}

/// A [`DependencyContext`] that records tasks in first-seen order, once each.
///
/// # Example
///
/// ```rust
/// use kiln_task::{DependencyContext, TaskDependencySet, TaskId};
///
/// let mut deps = TaskDependencySet::new();
/// deps.add(TaskId::new(2));
/// deps.add(TaskId::new(1));
/// deps.add(TaskId::new(2));
///
/// assert_eq!(deps.len(), 2);
/// assert_eq!(deps.as_slice(), &[TaskId::new(2), TaskId::new(1)]);
/// ```
#[derive(Clone, Default)]
pub struct TaskDependencySet {
    ordered: SmallVec<[TaskId; 4]>,
    seen: HashSet<TaskId>,
}

impl TaskDependencySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `task` has been recorded.
    #[must_use]
    pub fn contains(&self, task: TaskId) -> bool {
        self.seen.contains(&task)
    }

    /// Returns the number of distinct tasks recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the recorded tasks in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[TaskId] {
        &self.ordered
    }

    /// Iterates over the recorded tasks in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ordered.iter().copied()
    }

    /// Removes every recorded task.
    pub fn clear(&mut self) {
        self.ordered.clear();
        self.seen.clear();
    }
}

impl DependencyContext for TaskDependencySet {
    fn add(&mut self, task: TaskId) {
        if self.seen.insert(task) {
            self.ordered.push(task);
        }
    }
}

impl fmt::Debug for TaskDependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ordered.iter()).finish()
    }
}
