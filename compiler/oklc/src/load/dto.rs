//! Serialized AST as produced by the kernel parser.
//!
//! Every node carries an optional `span` (`[start, end]` byte offsets,
//! defaulting to `[0, 0]`). Statements and expressions are tagged by `kind`:
//!
//! ```json
//! {
//!   "functions": [{
//!     "name": "add",
//!     "attrs": [{ "name": "kernel" }],
//!     "params": [{ "name": "n", "type": { "base": "int", "const": true } }],
//!     "body": { "stmts": [
//!       { "kind": "for", "attrs": [{ "name": "outer" }],
//!         "init": { "kind": "decl", "type": { "base": "int" },
//!                   "declarators": [{ "name": "o", "init": { "kind": "int", "value": 0 } }] },
//!         "test": { "kind": "binary", "op": "<",
//!                   "lhs": { "kind": "ident", "name": "o" },
//!                   "rhs": { "kind": "ident", "name": "n" } },
//!         "update": { "kind": "unary", "op": "++x", "operand": { "kind": "ident", "name": "o" } },
//!         "body": { "kind": "block", "stmts": [] } }
//!     ] }
//!   }]
//! }
//! ```

use serde::Deserialize;

/// `[start, end]`
pub type SpanDto = [usize; 2];

#[derive(Deserialize, Debug)]
pub struct ModuleDto {
    #[serde(default)]
    pub functions: Vec<FunctionDto>,
}

#[derive(Deserialize, Debug)]
pub struct FunctionDto {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<AttributeDto>,
    #[serde(default)]
    pub params: Vec<ParamDto>,
    #[serde(default, rename = "return_type")]
    pub return_ty: Option<TypeDto>,
    pub body: BlockDto,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct AttributeDto {
    /// Marker name without the `@`.
    pub name: String,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct ParamDto {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDto,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct TypeDto {
    /// A type keyword (`int`, `long long`, ...) or a typedef name.
    pub base: String,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default, rename = "const")]
    pub is_const: bool,
    #[serde(default)]
    pub pointer: u8,
}

#[derive(Deserialize, Debug)]
pub struct BlockDto {
    #[serde(default)]
    pub stmts: Vec<StmtDto>,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct DeclarationDto {
    #[serde(rename = "type")]
    pub ty: TypeDto,
    pub declarators: Vec<DeclaratorDto>,
    #[serde(default)]
    pub attrs: Vec<AttributeDto>,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct DeclaratorDto {
    pub name: String,
    #[serde(default)]
    pub dims: Vec<ExprDto>,
    #[serde(default)]
    pub init: Option<ExprDto>,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
pub struct StmtDto {
    #[serde(flatten)]
    pub kind: StmtKindDto,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKindDto {
    Expr {
        expr: ExprDto,
    },
    Decl(DeclarationDto),
    Block {
        #[serde(default)]
        stmts: Vec<StmtDto>,
    },
    If {
        cond: ExprDto,
        then: Box<StmtDto>,
        #[serde(default, rename = "else")]
        else_branch: Option<Box<StmtDto>>,
    },
    For {
        #[serde(default)]
        init: Option<ForInitDto>,
        #[serde(default)]
        test: Option<ExprDto>,
        #[serde(default)]
        update: Option<ExprDto>,
        body: Box<StmtDto>,
        #[serde(default)]
        attrs: Vec<AttributeDto>,
    },
    While {
        cond: ExprDto,
        body: Box<StmtDto>,
    },
    DoWhile {
        body: Box<StmtDto>,
        cond: ExprDto,
    },
    Switch {
        scrutinee: ExprDto,
        body: Box<StmtDto>,
    },
    Case {
        #[serde(default)]
        value: Option<ExprDto>,
    },
    Break,
    Continue,
    Return {
        #[serde(default)]
        value: Option<ExprDto>,
    },
    Empty,
}

/// `for` init clause: a declaration or a bare expression.
#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForInitDto {
    Decl(DeclarationDto),
    Expr { expr: ExprDto },
}

#[derive(Deserialize, Debug)]
pub struct ExprDto {
    #[serde(flatten)]
    pub kind: ExprKindDto,
    #[serde(default)]
    pub span: SpanDto,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKindDto {
    Ident {
        name: String,
    },
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    Char {
        value: char,
    },
    String {
        value: String,
    },
    Unary {
        op: UnaryOpDto,
        operand: Box<ExprDto>,
    },
    Binary {
        op: BinaryOpDto,
        lhs: Box<ExprDto>,
        rhs: Box<ExprDto>,
    },
    Assign {
        op: AssignOpDto,
        target: Box<ExprDto>,
        value: Box<ExprDto>,
    },
    Call {
        callee: Box<ExprDto>,
        #[serde(default)]
        args: Vec<ExprDto>,
    },
    Index {
        base: Box<ExprDto>,
        index: Box<ExprDto>,
    },
    Member {
        base: Box<ExprDto>,
        field: String,
        #[serde(default)]
        arrow: bool,
    },
    Cast {
        #[serde(rename = "type")]
        ty: TypeDto,
        expr: Box<ExprDto>,
    },
    Ternary {
        cond: Box<ExprDto>,
        then: Box<ExprDto>,
        #[serde(rename = "else")]
        else_expr: Box<ExprDto>,
    },
    Comma {
        exprs: Vec<ExprDto>,
    },
    SizeofType {
        #[serde(rename = "type")]
        ty: TypeDto,
    },
}

/// Unary operator symbol. Increments and decrements spell their position:
/// `++x` / `x++`.
#[derive(Deserialize, Copy, Clone, Debug)]
pub enum UnaryOpDto {
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "*")]
    Deref,
    #[serde(rename = "&")]
    AddrOf,
    #[serde(rename = "++x")]
    PreInc,
    #[serde(rename = "--x")]
    PreDec,
    #[serde(rename = "x++")]
    PostInc,
    #[serde(rename = "x--")]
    PostDec,
    #[serde(rename = "sizeof")]
    Sizeof,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum BinaryOpDto {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum AssignOpDto {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Sub,
    #[serde(rename = "*=")]
    Mul,
    #[serde(rename = "/=")]
    Div,
    #[serde(rename = "%=")]
    Mod,
    #[serde(rename = "<<=")]
    Shl,
    #[serde(rename = ">>=")]
    Shr,
    #[serde(rename = "&=")]
    BitAnd,
    #[serde(rename = "|=")]
    BitOr,
    #[serde(rename = "^=")]
    BitXor,
}
