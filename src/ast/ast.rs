use std::fmt::{Display, Formatter};

/// The numeric type produced by literals and by evaluation.
pub type Integer = i64;

/// Binary operator tags.
///
/// A tag names the semantic operation, independently of the symbol a
/// grammar spells it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }
}

/// Prefix operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }
}

/// Expression tree.
///
/// Every node owns its children; trees are built bottom-up by the parser and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Integer),
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Identifier(String),
    Lambda {
        parameter: String,
        body: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn lambda(parameter: impl Into<String>, body: Expr) -> Self {
        Expr::Lambda {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    /// Builds an application, collapsing to the callee itself when there are
    /// no arguments.
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        if args.is_empty() {
            callee
        } else {
            Expr::Call {
                callee: Box::new(callee),
                args,
            }
        }
    }

    /// Short name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "literal",
            Expr::UnaryOp { .. } => "unary operation",
            Expr::BinaryOp { .. } => "binary operation",
            Expr::Identifier(_) => "identifier",
            Expr::Lambda { .. } => "lambda",
            Expr::Call { .. } => "call",
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Identifier(_) => 1,
            Expr::UnaryOp { operand, .. } => 1 + operand.depth(),
            Expr::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            Expr::Lambda { body, .. } => 1 + body.depth(),
            Expr::Call { callee, args } => {
                1 + args
                    .iter()
                    .map(Expr::depth)
                    .fold(callee.depth(), usize::max)
            }
        }
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Identifier(_))
    }

    fn fmt_operand(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_atomic() {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }
}

// Nested operations are always parenthesized, so the rendering re-parses to
// the same tree under any operator table.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.fmt_operand(f)
            }
            Expr::BinaryOp { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f)
            }
            Expr::Lambda { parameter, body } => write!(f, "fn {} => {}", parameter, body),
            Expr::Call { callee, args } => {
                callee.fmt_operand(f)?;
                for arg in args {
                    write!(f, " ")?;
                    arg.fmt_operand(f)?;
                }
                Ok(())
            }
        }
    }
}
