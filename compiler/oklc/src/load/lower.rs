//! DTO → IR lowering.

use okl_ir::{
    AssignOp, AttrKind, Attribute, BaseType, BinaryOp, Block, CType, Declaration, Declarator,
    Expr, ExprKind, ForInit, ForLoop, Function, Module, Name, Param, Span, Stmt, StmtKind,
    StringInterner, UnaryOp,
};

use super::dto::{
    AssignOpDto, AttributeDto, BinaryOpDto, BlockDto, DeclarationDto, ExprDto, ExprKindDto,
    ForInitDto, FunctionDto, ModuleDto, SpanDto, StmtDto, StmtKindDto, TypeDto, UnaryOpDto,
};
use super::LoadError;

type LoadResult<T> = Result<T, LoadError>;

/// Lower a deserialized module, interning names into `interner`.
pub fn lower_module(dto: &ModuleDto, interner: &StringInterner) -> LoadResult<Module> {
    let lowering = Lowering { interner };
    let functions = dto
        .functions
        .iter()
        .map(|f| lowering.function(f))
        .collect::<LoadResult<Vec<_>>>()?;
    Ok(Module::new(functions))
}

fn to_span([start, end]: SpanDto) -> LoadResult<Span> {
    Ok(Span::try_from_range(start..end)?)
}

struct Lowering<'a> {
    interner: &'a StringInterner,
}

impl Lowering<'_> {
    fn name(&self, what: &'static str, name: &str, span: Span) -> LoadResult<Name> {
        if name.is_empty() {
            return Err(LoadError::EmptyName { what, span });
        }
        Ok(self.interner.try_intern(name)?)
    }

    fn function(&self, dto: &FunctionDto) -> LoadResult<Function> {
        let span = to_span(dto.span)?;
        let params = dto
            .params
            .iter()
            .map(|p| {
                let span = to_span(p.span)?;
                Ok(Param {
                    name: self.name("parameter", &p.name, span)?,
                    ty: self.ty(&p.ty, span)?,
                    span,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;
        let return_ty = match &dto.return_ty {
            Some(ty) => self.ty(ty, span)?,
            None => CType::new(BaseType::Void),
        };
        Ok(Function {
            name: self.name("function", &dto.name, span)?,
            params,
            return_ty,
            body: self.block(&dto.body)?,
            attrs: self.attrs(&dto.attrs)?,
            span,
        })
    }

    fn attrs(&self, attrs: &[AttributeDto]) -> LoadResult<Vec<Attribute>> {
        attrs
            .iter()
            .map(|attr| {
                let span = to_span(attr.span)?;
                let name = attr.name.strip_prefix('@').unwrap_or(&attr.name);
                if name.is_empty() {
                    return Err(LoadError::EmptyName {
                        what: "attribute",
                        span,
                    });
                }
                Ok(Attribute::new(AttrKind::from_name(name, self.interner), span))
            })
            .collect()
    }

    fn ty(&self, dto: &TypeDto, span: Span) -> LoadResult<CType> {
        let base = match dto.base.as_str() {
            "void" => BaseType::Void,
            "bool" | "_Bool" => BaseType::Bool,
            "char" => BaseType::Char,
            "short" => BaseType::Short,
            "int" => BaseType::Int,
            "long" => BaseType::Long,
            "long long" => BaseType::LongLong,
            "float" => BaseType::Float,
            "double" => BaseType::Double,
            named => BaseType::Named(self.name("type", named, span)?),
        };
        Ok(CType {
            base,
            unsigned: dto.unsigned,
            is_const: dto.is_const,
            pointer_depth: dto.pointer,
        })
    }

    fn block(&self, dto: &BlockDto) -> LoadResult<Block> {
        Ok(Block::new(self.stmts(&dto.stmts)?, to_span(dto.span)?))
    }

    fn stmts(&self, stmts: &[StmtDto]) -> LoadResult<Vec<Stmt>> {
        stmts.iter().map(|s| self.stmt(s)).collect()
    }

    fn boxed_stmt(&self, dto: &StmtDto) -> LoadResult<Box<Stmt>> {
        self.stmt(dto).map(Box::new)
    }

    fn stmt(&self, dto: &StmtDto) -> LoadResult<Stmt> {
        let span = to_span(dto.span)?;
        let kind = match &dto.kind {
            StmtKindDto::Expr { expr } => StmtKind::Expr(self.expr(expr)?),
            // the statement's span is the declaration's span
            StmtKindDto::Decl(decl) => StmtKind::Decl(self.declaration(decl, span)?),
            StmtKindDto::Block { stmts } => StmtKind::Block(Block::new(self.stmts(stmts)?, span)),
            StmtKindDto::If {
                cond,
                then,
                else_branch,
            } => StmtKind::If {
                cond: self.expr(cond)?,
                then_branch: self.boxed_stmt(then)?,
                else_branch: else_branch
                    .as_deref()
                    .map(|s| self.boxed_stmt(s))
                    .transpose()?,
            },
            StmtKindDto::For {
                init,
                test,
                update,
                body,
                attrs,
            } => {
                let init = match init {
                    Some(ForInitDto::Decl(decl)) => {
                        let decl_span = to_span(decl.span)?;
                        Some(ForInit::Decl(self.declaration(decl, decl_span)?))
                    }
                    Some(ForInitDto::Expr { expr }) => Some(ForInit::Expr(self.expr(expr)?)),
                    None => None,
                };
                StmtKind::For(ForLoop {
                    init,
                    test: self.opt_expr(test.as_ref())?,
                    update: self.opt_expr(update.as_ref())?,
                    body: self.boxed_stmt(body)?,
                    attrs: self.attrs(attrs)?,
                    span,
                })
            }
            StmtKindDto::While { cond, body } => StmtKind::While {
                cond: self.expr(cond)?,
                body: self.boxed_stmt(body)?,
            },
            StmtKindDto::DoWhile { body, cond } => StmtKind::DoWhile {
                body: self.boxed_stmt(body)?,
                cond: self.expr(cond)?,
            },
            StmtKindDto::Switch { scrutinee, body } => StmtKind::Switch {
                scrutinee: self.expr(scrutinee)?,
                body: self.boxed_stmt(body)?,
            },
            StmtKindDto::Case { value } => StmtKind::CaseLabel(self.opt_expr(value.as_ref())?),
            StmtKindDto::Break => StmtKind::Break,
            StmtKindDto::Continue => StmtKind::Continue,
            StmtKindDto::Return { value } => StmtKind::Return(self.opt_expr(value.as_ref())?),
            StmtKindDto::Empty => StmtKind::Empty,
        };
        Ok(Stmt::new(kind, span))
    }

    fn declaration(&self, dto: &DeclarationDto, span: Span) -> LoadResult<Declaration> {
        let declarators = dto
            .declarators
            .iter()
            .map(|d| {
                let span = to_span(d.span)?;
                Ok(Declarator {
                    name: self.name("variable", &d.name, span)?,
                    dims: self.exprs(&d.dims)?,
                    init: self.opt_expr(d.init.as_ref())?,
                    span,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;
        Ok(Declaration {
            ty: self.ty(&dto.ty, span)?,
            declarators,
            attrs: self.attrs(&dto.attrs)?,
            span,
        })
    }

    fn exprs(&self, exprs: &[ExprDto]) -> LoadResult<Vec<Expr>> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    fn opt_expr(&self, expr: Option<&ExprDto>) -> LoadResult<Option<Expr>> {
        expr.map(|e| self.expr(e)).transpose()
    }

    fn boxed(&self, dto: &ExprDto) -> LoadResult<Box<Expr>> {
        self.expr(dto).map(Box::new)
    }

    fn expr(&self, dto: &ExprDto) -> LoadResult<Expr> {
        let span = to_span(dto.span)?;
        let kind = match &dto.kind {
            ExprKindDto::Ident { name } => ExprKind::Ident(self.name("identifier", name, span)?),
            ExprKindDto::Int { value } => ExprKind::Int(*value),
            ExprKindDto::Float { value } => ExprKind::Float(value.to_bits()),
            ExprKindDto::Char { value } => ExprKind::Char(*value),
            ExprKindDto::String { value } => ExprKind::Str(self.interner.try_intern(value)?),
            ExprKindDto::Unary { op, operand } => ExprKind::Unary {
                op: (*op).into(),
                operand: self.boxed(operand)?,
            },
            ExprKindDto::Binary { op, lhs, rhs } => ExprKind::Binary {
                op: (*op).into(),
                lhs: self.boxed(lhs)?,
                rhs: self.boxed(rhs)?,
            },
            ExprKindDto::Assign { op, target, value } => ExprKind::Assign {
                op: (*op).into(),
                target: self.boxed(target)?,
                value: self.boxed(value)?,
            },
            ExprKindDto::Call { callee, args } => ExprKind::Call {
                callee: self.boxed(callee)?,
                args: self.exprs(args)?,
            },
            ExprKindDto::Index { base, index } => ExprKind::Index {
                base: self.boxed(base)?,
                index: self.boxed(index)?,
            },
            ExprKindDto::Member { base, field, arrow } => ExprKind::Member {
                base: self.boxed(base)?,
                field: self.name("field", field, span)?,
                arrow: *arrow,
            },
            ExprKindDto::Cast { ty, expr } => ExprKind::Cast {
                ty: self.ty(ty, span)?,
                expr: self.boxed(expr)?,
            },
            ExprKindDto::Ternary {
                cond,
                then,
                else_expr,
            } => ExprKind::Ternary {
                cond: self.boxed(cond)?,
                then_expr: self.boxed(then)?,
                else_expr: self.boxed(else_expr)?,
            },
            ExprKindDto::Comma { exprs } => ExprKind::Comma(self.exprs(exprs)?),
            ExprKindDto::SizeofType { ty } => ExprKind::SizeofType(self.ty(ty, span)?),
        };
        Ok(Expr::new(kind, span))
    }
}

impl From<UnaryOpDto> for UnaryOp {
    fn from(op: UnaryOpDto) -> Self {
        match op {
            UnaryOpDto::Neg => UnaryOp::Neg,
            UnaryOpDto::Plus => UnaryOp::Plus,
            UnaryOpDto::Not => UnaryOp::Not,
            UnaryOpDto::BitNot => UnaryOp::BitNot,
            UnaryOpDto::Deref => UnaryOp::Deref,
            UnaryOpDto::AddrOf => UnaryOp::AddrOf,
            UnaryOpDto::PreInc => UnaryOp::PreInc,
            UnaryOpDto::PreDec => UnaryOp::PreDec,
            UnaryOpDto::PostInc => UnaryOp::PostInc,
            UnaryOpDto::PostDec => UnaryOp::PostDec,
            UnaryOpDto::Sizeof => UnaryOp::Sizeof,
        }
    }
}

impl From<BinaryOpDto> for BinaryOp {
    fn from(op: BinaryOpDto) -> Self {
        match op {
            BinaryOpDto::Add => BinaryOp::Add,
            BinaryOpDto::Sub => BinaryOp::Sub,
            BinaryOpDto::Mul => BinaryOp::Mul,
            BinaryOpDto::Div => BinaryOp::Div,
            BinaryOpDto::Mod => BinaryOp::Mod,
            BinaryOpDto::Shl => BinaryOp::Shl,
            BinaryOpDto::Shr => BinaryOp::Shr,
            BinaryOpDto::Lt => BinaryOp::Lt,
            BinaryOpDto::LtEq => BinaryOp::LtEq,
            BinaryOpDto::Gt => BinaryOp::Gt,
            BinaryOpDto::GtEq => BinaryOp::GtEq,
            BinaryOpDto::Eq => BinaryOp::Eq,
            BinaryOpDto::NotEq => BinaryOp::NotEq,
            BinaryOpDto::BitAnd => BinaryOp::BitAnd,
            BinaryOpDto::BitOr => BinaryOp::BitOr,
            BinaryOpDto::BitXor => BinaryOp::BitXor,
            BinaryOpDto::And => BinaryOp::And,
            BinaryOpDto::Or => BinaryOp::Or,
        }
    }
}

impl From<AssignOpDto> for AssignOp {
    fn from(op: AssignOpDto) -> Self {
        match op {
            AssignOpDto::Assign => AssignOp::Assign,
            AssignOpDto::Add => AssignOp::Add,
            AssignOpDto::Sub => AssignOp::Sub,
            AssignOpDto::Mul => AssignOp::Mul,
            AssignOpDto::Div => AssignOp::Div,
            AssignOpDto::Mod => AssignOp::Mod,
            AssignOpDto::Shl => AssignOp::Shl,
            AssignOpDto::Shr => AssignOp::Shr,
            AssignOpDto::BitAnd => AssignOp::BitAnd,
            AssignOpDto::BitOr => AssignOp::BitOr,
            AssignOpDto::BitXor => AssignOp::BitXor,
        }
    }
}
