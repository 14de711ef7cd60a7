// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Producer reporting.

use crate::context::DependencyContext;
use crate::id::TaskId;

/// Something whose value may be produced by a build step.
///
/// This is the query surface a scheduler uses to order execution without
/// asking for the value itself: none of these methods may realize the value,
/// since realization can require the dependency graph to exist already.
///
/// The defaults describe a value with no producer. Wrappers forward to what
/// they wrap, so a chain of derived values reports the step that originally
/// produced it.
pub trait TaskDependencySource {
    /// Calls `visitor` with each build step that produces this value.
    fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
        let _ = visitor;
    }

    /// Returns `true` if some build step produces this value.
    fn is_value_produced_by_task(&self) -> bool {
        false
    }

    /// Registers the build steps this value depends on with `context`.
    ///
    /// Returns `true` if dependencies were contributed, `false` if this source
    /// has nothing to say (the caller may then fall back to other means).
    fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
        let _ = context;
        false
    }
}

impl<S: TaskDependencySource + ?Sized> TaskDependencySource for &S {
    fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
        (**self).visit_producer_tasks(visitor);
    }

    fn is_value_produced_by_task(&self) -> bool {
        (**self).is_value_produced_by_task()
    }

    fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
        (**self).maybe_visit_build_dependencies(context)
    }
}

impl<S: TaskDependencySource + ?Sized> TaskDependencySource for alloc::sync::Arc<S> {
    fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
        (**self).visit_producer_tasks(visitor);
    }

    fn is_value_produced_by_task(&self) -> bool {
        (**self).is_value_produced_by_task()
    }

    fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
        (**self).maybe_visit_build_dependencies(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TaskDependencySet;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    struct Nothing;

    impl TaskDependencySource for Nothing {}

    struct ProducedBy(TaskId);

    impl TaskDependencySource for ProducedBy {
        fn visit_producer_tasks(&self, visitor: &mut dyn FnMut(TaskId)) {
            visitor(self.0);
        }

        fn is_value_produced_by_task(&self) -> bool {
            true
        }

        fn maybe_visit_build_dependencies(&self, context: &mut dyn DependencyContext) -> bool {
            context.add(self.0);
            true
        }
    }

    #[test]
    fn defaults_report_no_producer() {
        let mut deps = TaskDependencySet::new();
        let mut visited = Vec::new();

        Nothing.visit_producer_tasks(&mut |t| visited.push(t));
        assert!(visited.is_empty());
        assert!(!Nothing.is_value_produced_by_task());
        assert!(!Nothing.maybe_visit_build_dependencies(&mut deps));
        assert!(deps.is_empty());
    }

    #[test]
    fn references_and_arcs_forward() {
        let source = Arc::new(ProducedBy(TaskId::new(9)));
        let by_ref = &*source;

        let mut deps = TaskDependencySet::new();
        assert!(by_ref.maybe_visit_build_dependencies(&mut deps));
        assert!(source.is_value_produced_by_task());

        let mut visited = Vec::new();
        source.visit_producer_tasks(&mut |t| visited.push(t));
        assert_eq!(visited, [TaskId::new(9)]);
        assert_eq!(deps.as_slice(), &[TaskId::new(9)]);
    }
}
