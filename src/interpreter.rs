use std::fmt::Display;

use thiserror::Error;

use crate::ast::Expression;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{num}"),
            Self::Boolean(truth) => write!(f, "{truth}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Boolean,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "an integer"),
            Self::Boolean => write!(f, "a boolean"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum EvalError {
    #[error("unbound identifier \"{name}\"")]
    UnboundVariable { name: String },
    #[error("type mismatch: expected {expected}, but {expression} evaluated to {found}")]
    TypeMismatch {
        expected: ValueType,
        found: Value,
        expression: String,
    },
    #[error("integer overflow in minus({first}, {second})")]
    Overflow { first: i64, second: i64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

/// The bindings visible at some point of evaluation, oldest first.
///
/// Extending an environment produces a new one; the original is untouched, so
/// sibling subtrees never see each other's bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    bindings: Vec<Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent binding for `name` wins.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings
            .iter()
            .rev()
            .find(|binding| binding.name == name)
            .map(|binding| binding.value)
    }

    #[must_use]
    pub fn extend(&self, name: &str, value: Value) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.push(Binding {
            name: name.to_string(),
            value,
        });
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, Binding { name, value }) in self.bindings.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        write!(f, "]")
    }
}

/// One node evaluation, recorded once the node has produced its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub depth: usize,
    pub node: String,
    pub environment: Environment,
    pub value: Value,
}

/// Every node evaluation of a run, in the order the nodes finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
    pub result: Value,
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for TraceStep {
            depth,
            node,
            environment,
            value,
        } in &self.steps
        {
            writeln!(
                f,
                "{}{node} => {value}    {environment}",
                "  ".repeat(*depth)
            )?;
        }
        Ok(())
    }
}

/// Evaluate an expression from an empty environment.
pub fn interpret(expr: &Expression) -> Result<Value, EvalError> {
    Walker { steps: None }.recurse(expr, &Environment::new(), 0)
}

/// Evaluate an expression and render the result as text, e.g. `"7"` or `"true"`.
pub fn evaluate(expr: &Expression) -> Result<String, EvalError> {
    interpret(expr).map(|value| value.to_string())
}

/// Evaluate an expression, recording each node with the environment it was evaluated in.
pub fn trace(expr: &Expression) -> Result<Trace, EvalError> {
    let mut walker = Walker {
        steps: Some(Vec::new()),
    };
    let result = walker.recurse(expr, &Environment::new(), 0)?;
    Ok(Trace {
        steps: walker.steps.unwrap_or_default(),
        result,
    })
}

fn as_integer(expr: &Expression, value: Value) -> Result<i64, EvalError> {
    match value {
        Value::Integer(num) => Ok(num),
        found => Err(EvalError::TypeMismatch {
            expected: ValueType::Integer,
            found,
            expression: expr.to_string(),
        }),
    }
}

fn as_boolean(expr: &Expression, value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(truth) => Ok(truth),
        found => Err(EvalError::TypeMismatch {
            expected: ValueType::Boolean,
            found,
            expression: expr.to_string(),
        }),
    }
}

/// Walks a tree, optionally keeping a record of every node it evaluates.
struct Walker {
    steps: Option<Vec<TraceStep>>,
}

impl Walker {
    fn recurse(
        &mut self,
        expr: &Expression,
        env: &Environment,
        depth: usize,
    ) -> Result<Value, EvalError> {
        let value = match expr {
            Expression::IntLiteral(num) => Value::Integer(*num),
            Expression::Variable(name) => match env.lookup(name) {
                Some(value) => value,
                None => return Err(EvalError::UnboundVariable { name: name.clone() }),
            },
            Expression::Minus { first, second } => {
                let first_num = as_integer(first, self.recurse(first, env, depth + 1)?)?;
                let second_num = as_integer(second, self.recurse(second, env, depth + 1)?)?;
                match first_num.checked_sub(second_num) {
                    Some(difference) => Value::Integer(difference),
                    None => {
                        return Err(EvalError::Overflow {
                            first: first_num,
                            second: second_num,
                        });
                    }
                }
            }
            Expression::IsZero { value } => {
                let num = as_integer(value, self.recurse(value, env, depth + 1)?)?;
                Value::Boolean(num == 0)
            }
            Expression::Condition { predicate, yes, no } => {
                let truth = as_boolean(predicate, self.recurse(predicate, env, depth + 1)?)?;
                let branch = if truth { yes } else { no };
                self.recurse(branch, env, depth + 1)?
            }
            Expression::Binding { name, value, body } => {
                // The new name is not visible inside its own definition.
                let bound = self.recurse(value, env, depth + 1)?;
                self.recurse(body, &env.extend(name, bound), depth + 1)?
            }
        };

        if let Some(steps) = &mut self.steps {
            steps.push(TraceStep {
                depth,
                node: expr.label(),
                environment: env.clone(),
                value,
            });
        }

        Ok(value)
    }
}
