// Semantic analysis: one top-to-bottom pass over the AST that checks scoping,
// types, const-ness, jump placement, return contracts and initialization.
//
// - lib.rs: SemanticAnalyzer, declarations and statements
// - expressions.rs: expression typing

mod expressions;

use model::{Block, DeclId, Declaration, Expr, FuncDef, JumpKind, Program, ScopeChain, SemanticError, Stmt, Type, VarDef};
use model::{BUILTIN_PRINT, BUILTIN_SCAN, ENTRY_POINT};
use tracing::{debug, trace};

/// Result of a successful analysis: the initialization counter of every
/// declaration, indexed by `DeclId`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    init_counts: Vec<u32>,
}

impl Analysis {
    pub fn init_count(&self, id: DeclId) -> u32 {
        self.init_counts.get(id.0).copied().unwrap_or(0)
    }

    pub fn is_initialized(&self, id: DeclId) -> bool {
        self.init_count(id) > 0
    }
}

/// Check a parsed program. The first violation aborts the pass.
pub fn analyze(program: &Program) -> Result<Analysis, SemanticError> {
    SemanticAnalyzer::new(program).analyze()
}

/// Per-call analysis state, passed down the recursion by value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    /// Enclosing `while` loops inside the current function.
    pub(crate) loop_depth: u32,
    /// `main` has been registered before this point.
    pub(crate) entry_seen: bool,
    /// An assignment is being analyzed further up.
    pub(crate) assigning: bool,
}

pub struct SemanticAnalyzer<'p> {
    program: &'p Program,
    scopes: ScopeChain<DeclId>,
    init_counts: Vec<u32>,
}

impl<'p> SemanticAnalyzer<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            scopes: ScopeChain::new(),
            init_counts: vec![0; program.declarations.len()],
        }
    }

    pub fn analyze(mut self) -> Result<Analysis, SemanticError> {
        let mut ctx = Context::default();
        let mut mains = 0;

        let program = self.program;
        for &id in &program.items {
            let found = self.analyze_declaration(id, ctx)?;
            mains += found;
            ctx.entry_seen |= found > 0;
        }

        match mains {
            0 => return Err(SemanticError::MissingMain),
            1 => {}
            n => return Err(SemanticError::MultipleMain(n)),
        }

        debug!(declarations = self.init_counts.len(), "analysis complete");
        Ok(Analysis {
            init_counts: self.init_counts,
        })
    }

    pub(crate) fn mark_initialized(&mut self, id: DeclId) {
        self.init_counts[id.0] += 1;
    }

    /// Returns the number of `main` definitions found.
    fn analyze_declaration(&mut self, id: DeclId, ctx: Context) -> Result<usize, SemanticError> {
        let program = self.program;
        match program.declaration(id) {
            Declaration::Var(var) => {
                self.analyze_var(id, var, ctx)?;
                Ok(0)
            }
            Declaration::Func(function) => self.analyze_function(id, function, ctx),
        }
    }

    fn analyze_var(&mut self, id: DeclId, var: &VarDef, ctx: Context) -> Result<(), SemanticError> {
        check_not_builtin(&var.name)?;
        if var.r#type == Type::Void {
            return Err(SemanticError::VoidVariable(var.name.clone()));
        }

        // The initializer cannot see the variable it initializes
        if let Some(init) = &var.init {
            let ty = self.analyze_expr(init, Context { assigning: false, ..ctx })?;
            expressions::expect_type(var.r#type, ty)?;
            self.mark_initialized(id);
        }

        self.scopes.add(&var.name, id)?;
        Ok(())
    }

    fn analyze_function(&mut self, id: DeclId, function: &'p FuncDef, ctx: Context) -> Result<usize, SemanticError> {
        check_not_builtin(&function.name)?;
        let is_main = function.name == ENTRY_POINT;
        if is_main && !function.params.is_empty() {
            return Err(SemanticError::MainParameters);
        }

        // Registered first so the body can recurse
        self.scopes.add(&function.name, id)?;
        self.mark_initialized(id);
        trace!(name = %function.name, "analyzing function");

        let body_ctx = Context {
            loop_depth: 0,
            entry_seen: ctx.entry_seen || is_main,
            assigning: false,
        };

        self.scopes.enter();
        for &param in &function.params {
            if let Some(var) = self.program.var(param) {
                check_not_builtin(&var.name)?;
                if var.r#type == Type::Void {
                    return Err(SemanticError::VoidVariable(var.name.clone()));
                }
                self.scopes.add(&var.name, param)?;
                self.mark_initialized(param);
            }
        }
        let nested_mains = self.analyze_function_body(function, body_ctx)?;
        self.scopes.exit()?;

        Ok(nested_mains + usize::from(is_main))
    }

    /// Body statements share the parameter scope. Jumps that sit directly in
    /// the body are checked against the function's contract here.
    fn analyze_function_body(&mut self, function: &FuncDef, mut ctx: Context) -> Result<usize, SemanticError> {
        let mut mains = 0;
        let mut has_return = false;

        for stmt in &function.body.statements {
            let Stmt::Jump(jump) = stmt else {
                let found = self.analyze_stmt(stmt, ctx)?;
                mains += found;
                ctx.entry_seen |= found > 0;
                continue;
            };

            match jump.kind {
                JumpKind::Break | JumpKind::Continue => {
                    return Err(SemanticError::JumpInFunctionBody {
                        keyword: jump_keyword(jump.kind),
                        function: function.name.clone(),
                    });
                }
                JumpKind::Return => {
                    has_return = true;
                    let found = match &jump.value {
                        Some(value) => self.analyze_expr(value, ctx)?,
                        None => Type::Void,
                    };
                    if found != function.return_type {
                        return Err(SemanticError::ReturnType {
                            function: function.name.clone(),
                            expected: function.return_type,
                            found,
                        });
                    }
                }
            }
        }

        if !has_return && function.return_type != Type::Void {
            return Err(SemanticError::MissingReturn(function.name.clone()));
        }
        Ok(mains)
    }

    /// Returns the number of `main` definitions nested in the statement.
    fn analyze_stmt(&mut self, stmt: &Stmt, ctx: Context) -> Result<usize, SemanticError> {
        match stmt {
            Stmt::VarDecl(id) | Stmt::FuncDecl(id) => self.analyze_declaration(*id, ctx),
            Stmt::Expr(expr) => {
                self.analyze_expr(expr, ctx)?;
                Ok(0)
            }
            Stmt::Block(block) => self.analyze_block(block, ctx),
            Stmt::If { cond, then_branch, else_branch } => {
                self.scopes.enter();
                self.analyze_condition(cond, ctx)?;
                let mut mains = self.analyze_block(then_branch, ctx)?;
                if let Some(else_stmt) = else_branch {
                    let ctx = Context { entry_seen: ctx.entry_seen || mains > 0, ..ctx };
                    mains += self.analyze_stmt(else_stmt, ctx)?;
                }
                self.scopes.exit()?;
                Ok(mains)
            }
            Stmt::While { cond, body } => {
                self.scopes.enter();
                self.analyze_condition(cond, ctx)?;
                let body_ctx = Context { loop_depth: ctx.loop_depth + 1, ..ctx };
                let mains = self.analyze_block(body, body_ctx)?;
                self.scopes.exit()?;
                Ok(mains)
            }
            Stmt::Jump(jump) => {
                match jump.kind {
                    JumpKind::Break | JumpKind::Continue if ctx.loop_depth == 0 => {
                        return Err(SemanticError::JumpOutsideLoop(jump_keyword(jump.kind)));
                    }
                    JumpKind::Break | JumpKind::Continue => {}
                    // Only resolved here; the return type is checked for
                    // returns directly in a function body
                    JumpKind::Return => {
                        if let Some(value) = &jump.value {
                            self.analyze_expr(value, ctx)?;
                        }
                    }
                }
                Ok(0)
            }
        }
    }

    fn analyze_block(&mut self, block: &Block, mut ctx: Context) -> Result<usize, SemanticError> {
        self.scopes.enter();
        let mut mains = 0;
        for stmt in &block.statements {
            let found = self.analyze_stmt(stmt, ctx)?;
            mains += found;
            ctx.entry_seen |= found > 0;
        }
        self.scopes.exit()?;
        Ok(mains)
    }

    fn analyze_condition(&mut self, cond: &Expr, ctx: Context) -> Result<(), SemanticError> {
        match self.analyze_expr(cond, ctx)? {
            Type::Bool => Ok(()),
            other => Err(SemanticError::ConditionType(other)),
        }
    }
}

fn check_not_builtin(name: &str) -> Result<(), SemanticError> {
    if name == BUILTIN_PRINT || name == BUILTIN_SCAN {
        return Err(SemanticError::BuiltinRedefinition(name.to_string()));
    }
    Ok(())
}

fn jump_keyword(kind: JumpKind) -> &'static str {
    match kind {
        JumpKind::Break => "break",
        JumpKind::Continue => "continue",
        JumpKind::Return => "return",
    }
}
