use crate::error::Span;
use std::fmt;
use std::mem;

/// A parsed program: its statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Node>,
}

/// Every node owns its children; the tree never shares subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Assign {
        name: String,
        expr: Box<Node>,
        span: Span,
    },
    BinaryOp {
        left: Box<Node>,
        operator: BinaryOp,
        right: Box<Node>,
        span: Span,
    },
    Number {
        value: f64,
        span: Span,
    },
    String {
        value: String,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Print {
        expr: Box<Node>,
        span: Span,
    },
}

impl Node {
    pub fn span(&self) -> &Span {
        match self {
            Node::Assign { span, .. } => span,
            Node::BinaryOp { span, .. } => span,
            Node::Number { span, .. } => span,
            Node::String { span, .. } => span,
            Node::Variable { span, .. } => span,
            Node::Print { span, .. } => span,
        }
    }

    fn detach_children(&mut self, stack: &mut Vec<Node>) {
        let leaf = || Node::Number {
            value: 0.0,
            span: Span::new(0, 0),
        };

        match self {
            Node::BinaryOp { left, right, .. } => {
                stack.push(mem::replace(left.as_mut(), leaf()));
                stack.push(mem::replace(right.as_mut(), leaf()));
            }
            Node::Assign { expr, .. } | Node::Print { expr, .. } => {
                stack.push(mem::replace(expr.as_mut(), leaf()));
            }
            Node::Number { .. } | Node::String { .. } | Node::Variable { .. } => {}
        }
    }
}

// Long operator chains nest as deep as they are long; tear them down
// iteratively instead of through recursive drop glue.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Assign { name, expr, .. } => write!(f, "Assign({} = {})", name, expr),
            Node::BinaryOp {
                left,
                operator,
                right,
                ..
            } => write!(f, "BinaryOp({} {} {})", left, operator, right),
            Node::Number { value, .. } => write!(f, "Number({})", value),
            Node::String { value, .. } => write!(f, "String(\"{}\")", value),
            Node::Variable { name, .. } => write!(f, "Variable({})", name),
            Node::Print { expr, .. } => write!(f, "Print({})", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        };
        write!(f, "{}", symbol)
    }
}
