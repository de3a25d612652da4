use crate::ast::{BinaryOp, Node};
use crate::error::{QuillError, Span};
use crate::value::Value;
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use tracing::trace;

/// Single global namespace for one interpretation run.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Binds `name`, replacing any earlier value.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Tree-walking evaluator writing program output line by line to `W`.
pub struct Evaluator<W: Write = Stdout> {
    environment: Environment,
    output: W,
}

impl Evaluator<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Evaluator<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Evaluator<W> {
    pub fn with_output(output: W) -> Self {
        Self {
            environment: Environment::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Executes statements in order, stopping at the first error.
    /// Bindings made before the failure are kept.
    pub fn interpret(&mut self, statements: &[Node]) -> Result<(), QuillError> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Node) -> Result<(), QuillError> {
        match stmt {
            Node::Assign { name, expr, span } => {
                let value = self.evaluate(expr)?;
                trace!(name = %name, value = %value, "bound variable");
                self.environment.assign(name, value.clone());
                self.emit(span, format_args!("{} = {}", name, value))
            }
            Node::Print { expr, span } => {
                let value = self.evaluate(expr)?;
                self.emit(span, format_args!("{}", value))
            }
            Node::BinaryOp { .. } | Node::Number { .. } | Node::String { .. } | Node::Variable { .. } => {
                self.evaluate(stmt)?;
                Ok(())
            }
        }
    }

    fn emit(&mut self, span: &Span, line: std::fmt::Arguments) -> Result<(), QuillError> {
        writeln!(self.output, "{}", line).map_err(|error| QuillError::output_error(span.clone(), error))
    }

    pub fn evaluate(&self, expr: &Node) -> Result<Value, QuillError> {
        match expr {
            Node::Number { value, .. } => Ok(Value::Number(*value)),
            Node::String { value, .. } => Ok(Value::String(value.clone())),
            Node::Variable { name, span } => self
                .environment
                .get(name)
                .cloned()
                .ok_or_else(|| QuillError::undefined_variable(span.clone(), name)),
            Node::BinaryOp { .. } => self.evaluate_chain(expr),
            Node::Assign { span, .. } | Node::Print { span, .. } => {
                Err(QuillError::not_an_expression(span.clone()))
            }
        }
    }

    /// Evaluates a left-leaning operator chain bottom-up without recursing
    /// down its left spine.
    fn evaluate_chain(&self, expr: &Node) -> Result<Value, QuillError> {
        let mut pending = Vec::new();
        let mut node = expr;
        while let Node::BinaryOp {
            left,
            operator,
            right,
            span,
        } = node
        {
            pending.push((*operator, right.as_ref(), span));
            node = left;
        }

        let mut value = self.evaluate(node)?;
        for (operator, right, span) in pending.into_iter().rev() {
            let right_val = self.evaluate(right)?;
            value = self.evaluate_binary_op(operator, value, right_val, span)?;
        }
        Ok(value)
    }

    fn evaluate_binary_op(
        &self,
        operator: BinaryOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, QuillError> {
        match (operator, left, right) {
            (BinaryOp::Add, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (BinaryOp::Add, l, r) => Ok(Value::String(format!("{}{}", l, r))),
            (BinaryOp::Subtract, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l - r)),
            (BinaryOp::Multiply, Value::Number(l), Value::Number(r)) => Ok(Value::Number(l * r)),
            (BinaryOp::Divide, Value::Number(l), Value::Number(r)) => {
                if r == 0.0 {
                    Err(QuillError::division_by_zero(span.clone()))
                } else {
                    Ok(Value::Number(l / r))
                }
            }
            (operator, l, r) => Err(QuillError::invalid_operation(
                span.clone(),
                operator,
                l.type_name(),
                r.type_name(),
            )
            .with_help("Only '+' accepts strings; '-', '*' and '/' need two numbers.")),
        }
    }
}
