//! Attribute classification.
//!
//! Turns the raw marker list of a function, loop or declaration into a
//! single role. Classification is strict here and lenient everywhere else:
//! this stage reports unknown and conflicting markers, while later stages
//! read roles through [`LoopRole::of`] and [`DeclRole::of`], which take the
//! first role marker and never fail.

use okl_ir::visitor::{walk_declaration, walk_for, Visitor};
use okl_ir::{AttrKind, Attribute, Declaration, ForLoop, Function};

use crate::context::{KernelContext, ProblemSink};
use crate::problem::KernelProblem;
use crate::registry::{builtin_targets, AttrTarget, AttributeRegistry};

/// Role of a `for` loop.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LoopRole {
    #[default]
    None,
    Outer,
    Inner,
}

impl LoopRole {
    /// Role from the first `@outer`/`@inner` marker.
    pub fn of(for_loop: &ForLoop) -> Self {
        for attr in &for_loop.attrs {
            match attr.kind {
                AttrKind::Outer => return LoopRole::Outer,
                AttrKind::Inner => return LoopRole::Inner,
                _ => {}
            }
        }
        LoopRole::None
    }

    pub fn is_attributed(self) -> bool {
        self != LoopRole::None
    }

    /// Attribute name without the `@`, empty for plain loops.
    pub fn as_str(self) -> &'static str {
        match self {
            LoopRole::None => "",
            LoopRole::Outer => "outer",
            LoopRole::Inner => "inner",
        }
    }
}

/// Role of a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DeclRole {
    #[default]
    None,
    Shared,
    Exclusive,
}

impl DeclRole {
    /// Role from the first `@shared`/`@exclusive` marker.
    pub fn of(decl: &Declaration) -> Self {
        for attr in &decl.attrs {
            match attr.kind {
                AttrKind::Shared => return DeclRole::Shared,
                AttrKind::Exclusive => return DeclRole::Exclusive,
                _ => {}
            }
        }
        DeclRole::None
    }
}

/// Classify a marker list found on `target`.
///
/// Returns the role marker (if any) or every problem with the list.
/// Accepted custom markers carry no role and are ignored.
pub fn classify_markers(
    attrs: &[Attribute],
    target: AttrTarget,
    registry: &AttributeRegistry,
) -> Result<Option<AttrKind>, Vec<KernelProblem>> {
    let mut role: Option<&Attribute> = None;
    let mut problems = Vec::new();

    for attr in attrs {
        if !registry.accepts(attr.kind, target) {
            problems.push(KernelProblem::UnknownAttribute {
                span: attr.span,
                attr: attr.kind,
                target,
            });
            continue;
        }
        if builtin_targets(attr.kind).is_none() {
            continue;
        }
        match role {
            None => role = Some(attr),
            Some(first) => problems.push(KernelProblem::DuplicateAttribute {
                span: attr.span,
                attr: attr.kind,
                first_span: first.span,
            }),
        }
    }

    if problems.is_empty() {
        Ok(role.map(|attr| attr.kind))
    } else {
        Err(problems)
    }
}

/// Classify the markers of a `for` loop.
pub fn classify_loop(
    for_loop: &ForLoop,
    registry: &AttributeRegistry,
) -> Result<LoopRole, Vec<KernelProblem>> {
    classify_markers(&for_loop.attrs, AttrTarget::Loop, registry).map(|kind| match kind {
        Some(AttrKind::Outer) => LoopRole::Outer,
        Some(AttrKind::Inner) => LoopRole::Inner,
        _ => LoopRole::None,
    })
}

/// Classify the markers of a declaration.
pub fn classify_declaration(
    decl: &Declaration,
    registry: &AttributeRegistry,
) -> Result<DeclRole, Vec<KernelProblem>> {
    classify_markers(&decl.attrs, AttrTarget::Declaration, registry).map(|kind| match kind {
        Some(AttrKind::Shared) => DeclRole::Shared,
        Some(AttrKind::Exclusive) => DeclRole::Exclusive,
        _ => DeclRole::None,
    })
}

/// Classify the markers of a function. `Ok(true)` for a kernel.
pub fn classify_function(
    function: &Function,
    registry: &AttributeRegistry,
) -> Result<bool, Vec<KernelProblem>> {
    classify_markers(&function.attrs, AttrTarget::Function, registry)
        .map(|kind| kind == Some(AttrKind::Kernel))
}

/// Classify the kernel's own markers and those of every loop and
/// declaration in its body.
#[tracing::instrument(level = "debug", skip_all, fields(kernel = cx.kernel_name()))]
pub(crate) fn check_attributes(cx: &KernelContext<'_>, sink: &mut ProblemSink) {
    if let Err(problems) = classify_function(cx.kernel, cx.registry) {
        for problem in problems {
            sink.push(problem);
        }
    }
    let mut classifier = Classifier {
        registry: cx.registry,
        sink,
    };
    classifier.visit_block(&cx.kernel.body);
}

struct Classifier<'a> {
    registry: &'a AttributeRegistry,
    sink: &'a mut ProblemSink,
}

impl Classifier<'_> {
    fn report(&mut self, result: Result<impl Sized, Vec<KernelProblem>>) {
        if let Err(problems) = result {
            for problem in problems {
                self.sink.push(problem);
            }
        }
    }
}

impl<'ast> Visitor<'ast> for Classifier<'_> {
    fn visit_for(&mut self, for_loop: &'ast ForLoop) {
        if self.sink.is_done() {
            return;
        }
        let result = classify_loop(for_loop, self.registry);
        self.report(result);
        walk_for(self, for_loop);
    }

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        if self.sink.is_done() {
            return;
        }
        let result = classify_declaration(decl, self.registry);
        self.report(result);
        walk_declaration(self, decl);
    }
}

#[cfg(test)]
mod tests;
