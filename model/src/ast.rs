use crate::Type;

/// Index of a variable or function definition in `Program::declarations`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct DeclId(pub usize);

/// A parsed program. Every definition, including function parameters, is
/// owned by the `declarations` arena; `items` lists the top-level ones in
/// source order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub items: Vec<DeclId>,
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.0]
    }

    pub fn var(&self, id: DeclId) -> Option<&VarDef> {
        match self.declaration(id) {
            Declaration::Var(var) => Some(var),
            Declaration::Func(_) => None,
        }
    }

    pub fn func(&self, id: DeclId) -> Option<&FuncDef> {
        match self.declaration(id) {
            Declaration::Func(func) => Some(func),
            Declaration::Var(_) => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Declaration {
    Var(VarDef),
    Func(FuncDef),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Var(var) => &var.name,
            Declaration::Func(func) => &func.name,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct VarDef {
    pub r#type: Type,
    pub name: String,
    pub init: Option<Expr>,
    pub is_const: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FuncDef {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<DeclId>,
    pub body: Block,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Block(Block),
    Expr(Expr),
    If {
        cond: Expr,
        then_branch: Block,
        // Either another `Stmt::If` (else-if chain) or a `Stmt::Block`
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Jump(Jump),
    VarDecl(DeclId),
    FuncDecl(DeclId),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Jump {
    pub kind: JumpKind,
    pub value: Option<Expr>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum JumpKind {
    Break,
    Continue,
    Return,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Prefix {
        op: StepOp,
        operand: Box<Expr>,
    },
    Postfix {
        op: StepOp,
        operand: Box<Expr>,
    },
    Unary {
        op: SignOp,
        operand: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Identifier(String),
    IntLiteral(i32),
    DoubleLiteral(f64),
    CharLiteral(u8),
    BoolLiteral(bool),
    Paren(Box<Expr>),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Assign
            | BinaryOp::AddAssign
            | BinaryOp::SubAssign
            | BinaryOp::MulAssign
            | BinaryOp::DivAssign => 0,
            BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::Less
            | BinaryOp::Greater
            | BinaryOp::LessEqual
            | BinaryOp::GreaterEqual => 1,
            BinaryOp::Add | BinaryOp::Sub => 2,
            BinaryOp::Mul | BinaryOp::Div => 3,
            BinaryOp::Pow => 4,
        }
    }

    pub fn is_assignment(self) -> bool {
        self.precedence() == 0
    }

    pub fn is_comparison(self) -> bool {
        self.precedence() == 1
    }

    /// The arithmetic operator a compound assignment applies, e.g. `+=` -> `+`.
    pub fn compound_base(self) -> Option<BinaryOp> {
        match self {
            BinaryOp::AddAssign => Some(BinaryOp::Add),
            BinaryOp::SubAssign => Some(BinaryOp::Sub),
            BinaryOp::MulAssign => Some(BinaryOp::Mul),
            BinaryOp::DivAssign => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Unary sign: `+x`, `-x`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SignOp {
    Plus,
    Minus,
}

impl SignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            SignOp::Plus => "+",
            SignOp::Minus => "-",
        }
    }
}

/// Increment / decrement, used by both prefix and postfix forms.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StepOp {
    Increment,
    Decrement,
}

impl StepOp {
    pub fn symbol(self) -> &'static str {
        match self {
            StepOp::Increment => "++",
            StepOp::Decrement => "--",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ladder() {
        assert!(BinaryOp::Assign.precedence() < BinaryOp::Less.precedence());
        assert!(BinaryOp::Less.precedence() < BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() < BinaryOp::Pow.precedence());
    }

    #[test]
    fn compound_assignment_base() {
        assert_eq!(BinaryOp::DivAssign.compound_base(), Some(BinaryOp::Div));
        assert_eq!(BinaryOp::Assign.compound_base(), None);
        assert!(BinaryOp::MulAssign.is_assignment());
        assert!(BinaryOp::GreaterEqual.is_comparison());
    }
}
