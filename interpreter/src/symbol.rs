use model::{FuncDef, ScopeId};

use crate::value::Value;

/// Runtime binding stored in the scope chain.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Symbol<'a> {
    Variable(Value),
    /// A function remembers the scope it was defined in; calls resolve
    /// free names from there.
    Function { def: &'a FuncDef, scope: ScopeId },
}

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Option<Value>),
}
