use std::{
    fmt::{Display, Formatter},
    slice::Iter,
};

use super::ast::Expr;

/// A top-level parsed unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A list of independent expressions, as typed into a calculator.
    Expressions(Vec<Expr>),
    /// `let name = value`
    Let { name: String, value: Expr },
}

impl Statement {
    /// Iterates over the expression roots owned by this statement.
    pub fn iter(&self) -> Iter<'_, Expr> {
        match self {
            Statement::Expressions(exprs) => exprs.iter(),
            Statement::Let { value, .. } => std::slice::from_ref(value).iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::Expressions(exprs) if exprs.is_empty())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Expressions(exprs) => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                Ok(())
            }
            Statement::Let { name, value } => write!(f, "let {} = {}", name, value),
        }
    }
}
