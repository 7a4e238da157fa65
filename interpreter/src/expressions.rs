use std::io::{BufRead, Write};

use model::{BinaryOp, Expr, RuntimeError, StepOp, BUILTIN_PRINT, BUILTIN_SCAN};

use crate::builtins::print_values;
use crate::executor::Executor;
use crate::symbol::Symbol;
use crate::value::{self, Value};

impl<'a, R: BufRead, W: Write> Executor<'a, R, W> {
    pub(crate) fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(v) => Ok(Value::Int(*v)),
            Expr::DoubleLiteral(v) => Ok(Value::Double(*v)),
            Expr::CharLiteral(v) => Ok(Value::Char(*v)),
            Expr::BoolLiteral(v) => Ok(Value::Bool(*v)),
            Expr::Paren(inner) => self.eval(inner),
            Expr::Identifier(name) => self.read_var(name),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                value::sign(*op, value)
            }
            // Both forms yield the updated value
            Expr::Prefix { op, operand } | Expr::Postfix { op, operand } => self.step_var(*op, operand),
            Expr::Call { name, args } => self
                .call(name, args)?
                .ok_or_else(|| RuntimeError::VoidValue(name.clone())),
            Expr::Binary { op, left, right } if op.is_assignment() => self.assign(*op, left, right),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                value::binary(*op, left, right)
            }
        }
    }

    /// Like `eval`, but a call to a `void` function, parenthesized or not,
    /// yields `None` instead of an error.
    pub(crate) fn eval_maybe_void(&mut self, expr: &Expr) -> Result<Option<Value>, RuntimeError> {
        match expr {
            Expr::Call { name, args } => self.call(name, args),
            Expr::Paren(inner) => self.eval_maybe_void(inner),
            _ => self.eval(expr).map(Some),
        }
    }

    pub(crate) fn eval_discard(&mut self, expr: &Expr) -> Result<(), RuntimeError> {
        self.eval_maybe_void(expr).map(drop)
    }

    pub(crate) fn eval_condition(&mut self, cond: &Expr) -> Result<bool, RuntimeError> {
        match self.eval(cond)? {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::NonBoolCondition),
        }
    }

    fn call(&mut self, name: &str, args: &[Expr]) -> Result<Option<Value>, RuntimeError> {
        if name == BUILTIN_SCAN {
            for arg in args {
                let Expr::Identifier(target) = arg else {
                    return Err(RuntimeError::NotAssignable);
                };
                let ty = self.read_var(target)?.ty();
                let value = self.input.read(ty)?;
                self.write_var(target, value)?;
            }
            return Ok(None);
        }

        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;

        if name == BUILTIN_PRINT {
            print_values(&mut self.output, &values)?;
            return Ok(None);
        }

        self.call_function(name, values)
    }

    fn assign(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Value, RuntimeError> {
        let target = match left {
            Expr::Identifier(name) => name,
            Expr::Prefix { op: step, operand } => {
                self.step_var(*step, operand)?;
                match operand.as_ref() {
                    Expr::Identifier(name) => name,
                    _ => return Err(RuntimeError::NotAssignable),
                }
            }
            _ => return Err(RuntimeError::NotAssignable),
        };

        let rhs = self.eval(right)?;
        let value = if op.compound_base().is_some() {
            let current = self.read_var(target)?;
            value::binary(op, current, rhs)?
        } else {
            rhs
        };
        self.write_var(target, value)?;
        Ok(value)
    }

    fn step_var(&mut self, op: StepOp, operand: &Expr) -> Result<Value, RuntimeError> {
        let Expr::Identifier(name) = operand else {
            return Err(RuntimeError::NotAssignable);
        };
        let value = value::step(op, self.read_var(name)?)?;
        self.write_var(name, value)?;
        Ok(value)
    }

    fn read_var(&self, name: &str) -> Result<Value, RuntimeError> {
        match self.scopes.lookup(name) {
            Some(Symbol::Variable(value)) => Ok(*value),
            _ => Err(RuntimeError::UnresolvedIdentifier(name.to_string())),
        }
    }

    /// Store into an existing slot; the slot keeps its tag.
    fn write_var(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        match self.scopes.lookup_mut(name) {
            Some(Symbol::Variable(slot)) if slot.ty() == value.ty() => {
                *slot = value;
                Ok(())
            }
            Some(Symbol::Variable(slot)) => Err(RuntimeError::OperandMismatch {
                op: "=",
                left: slot.ty(),
                right: value.ty(),
            }),
            _ => Err(RuntimeError::UnresolvedIdentifier(name.to_string())),
        }
    }
}
