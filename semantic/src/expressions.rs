use model::{BinaryOp, DeclId, Declaration, Expr, FuncDef, SemanticError, StepOp, Type, VarDef};
use model::{BUILTIN_PRINT, BUILTIN_SCAN};
use crate::{Context, SemanticAnalyzer};

impl<'p> SemanticAnalyzer<'p> {
    /// Type-check an expression and return its inferred type.
    pub(crate) fn analyze_expr(&mut self, expr: &Expr, ctx: Context) -> Result<Type, SemanticError> {
        match expr {
            Expr::IntLiteral(_) => Ok(Type::Int),
            Expr::DoubleLiteral(_) => Ok(Type::Double),
            Expr::CharLiteral(_) => Ok(Type::Char),
            Expr::BoolLiteral(_) => Ok(Type::Bool),
            Expr::Paren(inner) => self.analyze_expr(inner, ctx),
            Expr::Identifier(name) => {
                let (id, var) = self.resolve_var(name)?;
                self.check_initialized(id, var, ctx)?;
                Ok(var.r#type)
            }
            Expr::Unary { op, operand } => {
                let ty = self.analyze_expr(operand, ctx)?;
                if !ty.is_signed_numeric() {
                    return Err(SemanticError::InvalidOperand { op: op.symbol(), ty });
                }
                Ok(ty)
            }
            Expr::Prefix { op, operand } | Expr::Postfix { op, operand } => {
                self.analyze_step(*op, operand, ctx)
            }
            Expr::Call { name, args } => self.analyze_call(name, args, ctx),
            Expr::Binary { op, left, right } if op.is_assignment() => {
                self.analyze_assignment(*op, left, right, ctx)
            }
            Expr::Binary { op, left, right } => {
                let left_ty = self.analyze_expr(left, ctx)?;
                let right_ty = self.analyze_expr(right, ctx)?;
                for ty in [left_ty, right_ty] {
                    let rejected = ty == Type::Void || (ty == Type::Bool && !op.is_comparison());
                    if rejected {
                        return Err(SemanticError::InvalidOperand { op: op.symbol(), ty });
                    }
                }
                expect_type(left_ty, right_ty)?;
                Ok(if op.is_comparison() { Type::Bool } else { left_ty })
            }
        }
    }

    /// Increment and decrement need a mutable numeric variable.
    fn analyze_step(&mut self, op: StepOp, operand: &Expr, ctx: Context) -> Result<Type, SemanticError> {
        let Expr::Identifier(name) = operand else {
            return Err(SemanticError::InvalidStepOperand { op: op.symbol() });
        };
        let (id, var) = self.resolve_var(name)?;
        if var.is_const {
            return Err(SemanticError::ConstAssignment(name.clone()));
        }
        if !var.r#type.is_signed_numeric() {
            return Err(SemanticError::InvalidOperand { op: op.symbol(), ty: var.r#type });
        }
        self.check_initialized(id, var, ctx)?;
        Ok(var.r#type)
    }

    fn analyze_assignment(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        ctx: Context,
    ) -> Result<Type, SemanticError> {
        if ctx.assigning {
            return Err(SemanticError::ChainedAssignment);
        }
        let ctx = Context { assigning: true, ..ctx };

        let target_ty = match left {
            Expr::Identifier(name) => {
                let (id, var) = self.resolve_var(name)?;
                if var.is_const {
                    return Err(SemanticError::ConstAssignment(name.clone()));
                }
                self.mark_initialized(id);
                var.r#type
            }
            Expr::Prefix { op: step, operand } => {
                // A stepped target is still written by the assignment
                if let Expr::Identifier(name) = operand.as_ref() {
                    let (id, _) = self.resolve_var(name)?;
                    self.mark_initialized(id);
                }
                self.analyze_step(*step, operand, ctx)?
            }
            _ => return Err(SemanticError::InvalidLvalue(op.symbol())),
        };

        if op.compound_base().is_some() && target_ty == Type::Bool {
            return Err(SemanticError::InvalidOperand { op: op.symbol(), ty: target_ty });
        }

        let value_ty = self.analyze_expr(right, ctx)?;
        expect_type(target_ty, value_ty)?;
        Ok(target_ty)
    }

    fn analyze_call(&mut self, name: &str, args: &[Expr], ctx: Context) -> Result<Type, SemanticError> {
        if name == BUILTIN_PRINT {
            for arg in args {
                if self.analyze_expr(arg, ctx)? == Type::Void {
                    return Err(SemanticError::VoidArgument);
                }
            }
            return Ok(Type::Void);
        }

        if name == BUILTIN_SCAN {
            for arg in args {
                let Expr::Identifier(target) = arg else {
                    return Err(SemanticError::ScanTarget);
                };
                let (id, var) = self.resolve_var(target)?;
                if var.is_const {
                    return Err(SemanticError::ConstAssignment(target.clone()));
                }
                self.mark_initialized(id);
            }
            return Ok(Type::Void);
        }

        let function = self.resolve_function(name)?;
        if args.len() != function.params.len() {
            return Err(SemanticError::ArityMismatch {
                name: name.to_string(),
                expected: function.params.len(),
                found: args.len(),
            });
        }

        let program = self.program;
        for (index, (arg, param)) in args.iter().zip(&function.params).enumerate() {
            let found = self.analyze_expr(arg, ctx)?;
            let expected = program.var(*param).map_or(Type::Void, |p| p.r#type);
            if found != expected {
                return Err(SemanticError::ArgumentType {
                    name: name.to_string(),
                    index: index + 1,
                    expected,
                    found,
                });
            }
        }

        Ok(function.return_type)
    }

    pub(crate) fn resolve_var(&self, name: &str) -> Result<(DeclId, &'p VarDef), SemanticError> {
        let id = *self
            .scopes
            .lookup(name)
            .ok_or_else(|| SemanticError::Undeclared(name.to_string()))?;
        match self.program.declaration(id) {
            Declaration::Var(var) => Ok((id, var)),
            Declaration::Func(_) => Err(SemanticError::NotAVariable(name.to_string())),
        }
    }

    fn resolve_function(&self, name: &str) -> Result<&'p FuncDef, SemanticError> {
        let id = *self
            .scopes
            .lookup(name)
            .ok_or_else(|| SemanticError::UndefinedFunction(name.to_string()))?;
        match self.program.declaration(id) {
            Declaration::Func(function) => Ok(function),
            Declaration::Var(_) => Err(SemanticError::NotAFunction(name.to_string())),
        }
    }

    /// Reads are only checked once `main` has been seen.
    fn check_initialized(&self, id: DeclId, var: &VarDef, ctx: Context) -> Result<(), SemanticError> {
        if ctx.entry_seen && self.init_counts[id.0] == 0 {
            return Err(SemanticError::UninitializedUse(var.name.clone()));
        }
        Ok(())
    }
}

pub(crate) fn expect_type(expected: Type, found: Type) -> Result<(), SemanticError> {
    if expected == found {
        Ok(())
    } else {
        Err(SemanticError::TypeMismatch { expected, found })
    }
}
