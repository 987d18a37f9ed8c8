//! Attribute registry.
//!
//! Registration belongs to the front-end; the validator only asks which node
//! kinds a custom marker was registered for. The built-in markers are fixed
//! and never stored here.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use okl_ir::{AttrKind, Name, StringInterner};

bitflags! {
    /// Node kinds an attribute may be attached to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AttrTargets: u8 {
        const FUNCTION = 1 << 0;
        const LOOP = 1 << 1;
        const DECLARATION = 1 << 2;
    }
}

/// The single node kind a marker is found on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrTarget {
    Function,
    Loop,
    Declaration,
}

impl AttrTarget {
    pub const fn flag(self) -> AttrTargets {
        match self {
            AttrTarget::Function => AttrTargets::FUNCTION,
            AttrTarget::Loop => AttrTargets::LOOP,
            AttrTarget::Declaration => AttrTargets::DECLARATION,
        }
    }

    /// Human-readable node kind for diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            AttrTarget::Function => "a function",
            AttrTarget::Loop => "a `for` loop",
            AttrTarget::Declaration => "a declaration",
        }
    }
}

/// Node kinds a built-in marker is accepted on. `None` for custom markers.
pub fn builtin_targets(kind: AttrKind) -> Option<AttrTargets> {
    match kind {
        AttrKind::Kernel => Some(AttrTargets::FUNCTION),
        AttrKind::Outer | AttrKind::Inner => Some(AttrTargets::LOOP),
        AttrKind::Shared | AttrKind::Exclusive => Some(AttrTargets::DECLARATION),
        AttrKind::Custom(_) => None,
    }
}

/// Custom attributes known to the front-end, keyed by interned name.
#[derive(Clone, Debug, Default)]
pub struct AttributeRegistry {
    custom: FxHashMap<Name, AttrTargets>,
}

impl AttributeRegistry {
    /// An empty registry: only the built-in markers are accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `targets`. Registering again widens the set.
    pub fn register(&mut self, name: Name, targets: AttrTargets) {
        *self.custom.entry(name).or_default() |= targets;
    }

    /// Convenience for `register(interner.intern(name), targets)`.
    pub fn register_str(&mut self, interner: &StringInterner, name: &str, targets: AttrTargets) {
        self.register(interner.intern(name), targets);
    }

    /// Node kinds `name` is registered for (empty if unknown).
    pub fn targets(&self, name: Name) -> AttrTargets {
        self.custom.get(&name).copied().unwrap_or_default()
    }

    /// Whether a marker of `kind` is accepted on `target`.
    pub fn accepts(&self, kind: AttrKind, target: AttrTarget) -> bool {
        let targets = match kind {
            AttrKind::Custom(name) => self.targets(name),
            builtin => builtin_targets(builtin).unwrap_or_default(),
        };
        targets.contains(target.flag())
    }

    pub fn len(&self) -> usize {
        self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }
}
