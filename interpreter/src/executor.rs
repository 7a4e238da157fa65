use std::io::{BufRead, Write};

use model::{Block, DeclId, Declaration, FuncDef, JumpKind, Program, RuntimeError, ScopeChain, Stmt, VarDef};
use model::ENTRY_POINT;
use tracing::{debug, trace};

use crate::builtins::Input;
use crate::symbol::{Flow, Symbol};
use crate::value::Value;

/// Tree-walking executor. Assumes the program passed semantic analysis.
pub struct Executor<'a, R, W> {
    pub(crate) program: &'a Program,
    pub(crate) scopes: ScopeChain<Symbol<'a>>,
    pub(crate) input: Input<R>,
    pub(crate) output: W,
}

impl<'a, R: BufRead, W: Write> Executor<'a, R, W> {
    pub fn new(program: &'a Program, input: R, output: W) -> Self {
        Self {
            program,
            scopes: ScopeChain::new(),
            input: Input::new(input),
            output,
        }
    }

    /// Run every top-level definition in order; `main` runs when reached.
    /// Output printed before a runtime error is still flushed.
    pub fn run(mut self) -> Result<(), RuntimeError> {
        let program = self.program;
        let result = program.items.iter().try_for_each(|&id| self.exec_declaration(id));
        let flushed = self.output.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn exec_declaration(&mut self, id: DeclId) -> Result<(), RuntimeError> {
        let program = self.program;
        match program.declaration(id) {
            Declaration::Var(var) => self.exec_var(var),
            Declaration::Func(function) => self.exec_function_def(function),
        }
    }

    fn exec_var(&mut self, var: &VarDef) -> Result<(), RuntimeError> {
        let value = match &var.init {
            Some(init) => self.eval(init)?,
            None => Value::zero(var.r#type).ok_or_else(|| RuntimeError::VoidValue(var.name.clone()))?,
        };
        self.scopes.add(&var.name, Symbol::Variable(value))?;
        Ok(())
    }

    fn exec_function_def(&mut self, function: &'a FuncDef) -> Result<(), RuntimeError> {
        let symbol = Symbol::Function {
            def: function,
            scope: self.scopes.current(),
        };
        self.scopes.add(&function.name, symbol)?;

        if function.name == ENTRY_POINT {
            debug!("entering main");
            self.scopes.enter();
            // The value `main` returns is not used
            self.exec_statements(&function.body.statements)?;
            self.scopes.exit()?;
            debug!("main finished");
        }
        Ok(())
    }

    /// Call a user function. Arguments are already evaluated in the caller.
    pub(crate) fn call_function(&mut self, name: &str, args: Vec<Value>) -> Result<Option<Value>, RuntimeError> {
        let Some(&Symbol::Function { def, scope }) = self.scopes.lookup(name) else {
            return Err(RuntimeError::UnresolvedFunction(name.to_string()));
        };
        trace!(name, depth = self.scopes.depth(), "call");

        self.scopes.enter_within(scope);
        let program = self.program;
        for (&param, value) in def.params.iter().zip(args) {
            if let Some(var) = program.var(param) {
                self.scopes.add(&var.name, Symbol::Variable(value))?;
            }
        }
        let flow = self.exec_statements(&def.body.statements)?;
        self.scopes.exit()?;

        Ok(match flow {
            Flow::Return(value) => value,
            _ => None,
        })
    }

    /// Stops at the first statement that does not complete normally.
    fn exec_statements(&mut self, statements: &'a [Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            let flow = self.exec_stmt(stmt)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_block(&mut self, block: &'a Block) -> Result<Flow, RuntimeError> {
        self.scopes.enter();
        trace!(depth = self.scopes.depth(), "enter scope");
        let flow = self.exec_statements(&block.statements)?;
        self.scopes.exit()?;
        Ok(flow)
    }

    fn exec_stmt(&mut self, stmt: &'a Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::VarDecl(id) | Stmt::FuncDecl(id) => {
                self.exec_declaration(*id)?;
                Ok(Flow::Normal)
            }
            Stmt::Expr(expr) => {
                self.eval_discard(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Block(block) => self.exec_block(block),
            Stmt::If { cond, then_branch, else_branch } => {
                if self.eval_condition(cond)? {
                    self.exec_block(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.exec_stmt(else_stmt)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { cond, body } => {
                while self.eval_condition(cond)? {
                    match self.exec_block(body)? {
                        Flow::Break => break,
                        Flow::Normal | Flow::Continue => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Jump(jump) => Ok(match jump.kind {
                JumpKind::Break => Flow::Break,
                JumpKind::Continue => Flow::Continue,
                JumpKind::Return => match &jump.value {
                    Some(value) => Flow::Return(self.eval_maybe_void(value)?),
                    None => Flow::Return(None),
                },
            }),
        }
    }
}
