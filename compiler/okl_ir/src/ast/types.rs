//! C type references.
//!
//! Only as much of a type as the validator needs: the base kind, signedness,
//! `const`, and pointer depth. Struct layouts and typedef bodies stay with the
//! front-end.

use crate::{Name, StringInterner};

/// Standard typedef names that denote integer types.
pub const INTEGER_TYPEDEFS: &[&str] = &[
    "size_t",
    "ssize_t",
    "ptrdiff_t",
    "intptr_t",
    "uintptr_t",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

/// Base type keyword or typedef name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BaseType {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    Float,
    Double,
    /// Typedef or struct name.
    Named(Name),
}

impl BaseType {
    /// Integer keyword types (`bool` excluded).
    pub const fn is_integer_keyword(self) -> bool {
        matches!(
            self,
            BaseType::Char | BaseType::Short | BaseType::Int | BaseType::Long | BaseType::LongLong
        )
    }

    pub fn name<'a>(&self, interner: &'a StringInterner) -> &'a str {
        match self {
            BaseType::Void => "void",
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Short => "short",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::LongLong => "long long",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::Named(name) => interner.lookup(*name),
        }
    }
}

/// A C type reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CType {
    pub base: BaseType,
    pub unsigned: bool,
    pub is_const: bool,
    pub pointer_depth: u8,
}

impl CType {
    /// Plain, signed, non-const, non-pointer type.
    pub const fn new(base: BaseType) -> Self {
        CType {
            base,
            unsigned: false,
            is_const: false,
            pointer_depth: 0,
        }
    }

    pub const fn int() -> Self {
        Self::new(BaseType::Int)
    }

    #[must_use]
    pub const fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    #[must_use]
    pub const fn with_unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    #[must_use]
    pub const fn with_pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    /// Whether a value of this type is an integer (usable as an induction
    /// variable).
    pub fn is_integral(&self, interner: &StringInterner) -> bool {
        if self.pointer_depth > 0 {
            return false;
        }
        match self.base {
            BaseType::Named(name) => INTEGER_TYPEDEFS.contains(&interner.lookup(name)),
            base => base.is_integer_keyword(),
        }
    }

    /// Render as C source (`const unsigned int *`).
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        if self.is_const {
            out.push_str("const ");
        }
        if self.unsigned {
            out.push_str("unsigned ");
        }
        out.push_str(self.base.name(interner));
        for _ in 0..self.pointer_depth {
            out.push_str(" *");
        }
        out
    }
}
