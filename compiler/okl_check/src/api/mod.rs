//! Kernel orchestration.
//!
//! Runs the validation stages over every kernel of a module and collects one
//! [`KernelVerdict`] per kernel, in source order.

use okl_diagnostic::Diagnostic;
use okl_ir::{Function, Module, Name, Span, StringInterner};
use rayon::prelude::*;

use crate::attrs::check_attributes;
use crate::context::{KernelContext, ProblemSink};
use crate::control_flow::check_control_flow;
use crate::loop_shape::check_loop_shapes;
use crate::nesting::check_nesting;
use crate::placement::check_placement;
use crate::problem::KernelProblem;
use crate::registry::AttributeRegistry;

/// How many problems a kernel may report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CheckMode {
    /// Stop at the first problem of each kernel.
    #[default]
    Fast,
    /// Run every stage and report every problem.
    CollectAll,
}

/// Configuration for [`check_kernels`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CheckConfig {
    pub mode: CheckMode,
    /// Validate kernels on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            mode: CheckMode::Fast,
            parallel: true,
        }
    }
}

impl CheckConfig {
    pub fn fast() -> Self {
        CheckConfig::default()
    }

    pub fn collect_all() -> Self {
        CheckConfig {
            mode: CheckMode::CollectAll,
            ..CheckConfig::default()
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcome for one kernel.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct KernelVerdict {
    pub name: Name,
    pub span: Span,
    pub problems: Vec<KernelProblem>,
}

impl KernelVerdict {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Verdicts for every kernel of a module, in source order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CheckReport {
    pub verdicts: Vec<KernelVerdict>,
}

impl CheckReport {
    /// True iff every kernel passed.
    pub fn passed(&self) -> bool {
        self.verdicts.iter().all(KernelVerdict::passed)
    }

    pub fn problem_count(&self) -> usize {
        self.verdicts.iter().map(|v| v.problems.len()).sum()
    }

    /// Verdicts of rejected kernels.
    pub fn rejected(&self) -> impl Iterator<Item = &KernelVerdict> {
        self.verdicts.iter().filter(|v| !v.passed())
    }

    /// Render every problem, each noting the kernel it was found in.
    pub fn diagnostics(&self, interner: &StringInterner) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::with_capacity(self.problem_count());
        for verdict in self.rejected() {
            let kernel = interner.lookup(verdict.name);
            diagnostics.extend(verdict.problems.iter().map(|problem| {
                problem
                    .into_diagnostic(interner)
                    .with_note(format!("in kernel `{kernel}`"))
            }));
        }
        diagnostics
    }
}

/// Validate a single kernel function.
///
/// Stages run in dependency order: attribute classification, loop shape,
/// nesting, declaration placement, control flow. In [`CheckMode::Fast`] the
/// remaining stages are skipped once a problem is found.
pub fn check_kernel(
    kernel: &Function,
    interner: &StringInterner,
    registry: &AttributeRegistry,
    mode: CheckMode,
) -> KernelVerdict {
    let cx = KernelContext {
        kernel,
        interner,
        registry,
    };
    let span = tracing::debug_span!("check_kernel", kernel = cx.kernel_name());
    let _guard = span.enter();

    let stages: [fn(&KernelContext<'_>, &mut ProblemSink); 5] = [
        check_attributes,
        check_loop_shapes,
        check_nesting,
        check_placement,
        check_control_flow,
    ];

    let mut sink = ProblemSink::new(mode);
    for stage in stages {
        if sink.is_done() {
            break;
        }
        stage(&cx, &mut sink);
    }

    tracing::debug!(problems = sink.len(), "kernel checked");
    KernelVerdict {
        name: kernel.name,
        span: kernel.span,
        problems: sink.into_problems(),
    }
}

/// Validate every kernel of `module`.
///
/// Functions that are not marked `@kernel` are skipped.
#[tracing::instrument(level = "debug", skip_all, fields(parallel = config.parallel))]
pub fn check_kernels(
    module: &Module,
    interner: &StringInterner,
    registry: &AttributeRegistry,
    config: CheckConfig,
) -> CheckReport {
    let kernels: Vec<&Function> = module.kernels().collect();
    let check = |kernel: &&Function| check_kernel(kernel, interner, registry, config.mode);

    // par_iter().map().collect() preserves input order
    let verdicts: Vec<KernelVerdict> = if config.parallel && kernels.len() > 1 {
        kernels.par_iter().map(check).collect()
    } else {
        kernels.iter().map(check).collect()
    };

    let report = CheckReport { verdicts };
    tracing::debug!(
        kernels = report.verdicts.len(),
        problems = report.problem_count(),
        "module checked"
    );
    report
}

/// True iff every kernel of `module` passes, stopping each kernel at its
/// first problem.
pub fn kernels_pass(
    module: &Module,
    interner: &StringInterner,
    registry: &AttributeRegistry,
) -> bool {
    check_kernels(module, interner, registry, CheckConfig::fast()).passed()
}

#[cfg(test)]
mod tests;
