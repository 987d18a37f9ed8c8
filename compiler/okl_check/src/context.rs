//! Per-kernel state shared by the validation stages.

use okl_ir::{Function, StringInterner};

use crate::api::CheckMode;
use crate::problem::KernelProblem;
use crate::registry::AttributeRegistry;

/// Read-only inputs for validating one kernel.
#[derive(Copy, Clone)]
pub(crate) struct KernelContext<'a> {
    pub kernel: &'a Function,
    pub interner: &'a StringInterner,
    pub registry: &'a AttributeRegistry,
}

impl KernelContext<'_> {
    pub fn kernel_name(&self) -> &str {
        self.interner.lookup(self.kernel.name)
    }
}

/// Accumulates problems for one kernel.
///
/// In fast mode the sink is done after its first problem and stages stop
/// traversing as soon as they see that.
pub(crate) struct ProblemSink {
    mode: CheckMode,
    problems: Vec<KernelProblem>,
}

impl ProblemSink {
    pub fn new(mode: CheckMode) -> Self {
        ProblemSink {
            mode,
            problems: Vec::new(),
        }
    }

    pub fn push(&mut self, problem: KernelProblem) {
        if self.is_done() {
            return;
        }
        tracing::trace!(rule = problem.rule_name(), "rule violated");
        self.problems.push(problem);
    }

    /// No further problems will be recorded.
    pub fn is_done(&self) -> bool {
        self.mode == CheckMode::Fast && !self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn into_problems(self) -> Vec<KernelProblem> {
        self.problems
    }
}

/// Run one stage over `kernel` with an empty registry.
#[cfg(test)]
pub(crate) fn run_stage(
    stage: fn(&KernelContext<'_>, &mut ProblemSink),
    kernel: &Function,
    interner: &StringInterner,
    mode: CheckMode,
) -> Vec<KernelProblem> {
    let registry = AttributeRegistry::new();
    let cx = KernelContext {
        kernel,
        interner,
        registry: &registry,
    };
    let mut sink = ProblemSink::new(mode);
    stage(&cx, &mut sink);
    sink.into_problems()
}
