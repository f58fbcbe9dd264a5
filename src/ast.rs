use std::fmt::Display;

/// A boxed Expression to allow recursive type structure.
pub type BoxExpr = Box<Expression>;

/// A node of the syntax tree. Every node owns its children outright.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expression {
    Variable(String),
    IntLiteral(i64),
    Minus {
        first: BoxExpr,
        second: BoxExpr,
    },
    IsZero {
        value: BoxExpr,
    },
    /// `if predicate then yes else no`. `yes` is taken when the predicate is true.
    Condition {
        predicate: BoxExpr,
        yes: BoxExpr,
        no: BoxExpr,
    },
    /// `let name = value in body`.
    Binding {
        name: String,
        value: BoxExpr,
        body: BoxExpr,
    },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> BoxExpr {
        Box::new(Self::Variable(name.into()))
    }

    pub fn int(value: i64) -> BoxExpr {
        Box::new(Self::IntLiteral(value))
    }

    pub fn minus(first: BoxExpr, second: BoxExpr) -> BoxExpr {
        Box::new(Self::Minus { first, second })
    }

    pub fn is_zero(value: BoxExpr) -> BoxExpr {
        Box::new(Self::IsZero { value })
    }

    pub fn condition(predicate: BoxExpr, yes: BoxExpr, no: BoxExpr) -> BoxExpr {
        Box::new(Self::Condition { predicate, yes, no })
    }

    pub fn binding(name: impl Into<String>, value: BoxExpr, body: BoxExpr) -> BoxExpr {
        Box::new(Self::Binding {
            name: name.into(),
            value,
            body,
        })
    }

    /// Name of the node in the nested tree notation.
    fn tree_name(&self) -> &'static str {
        match self {
            Self::Variable(_) => "VarExp",
            Self::IntLiteral(_) => "ConstExp",
            Self::Minus { .. } => "DiffExp",
            Self::IsZero { .. } => "IsZeroExp",
            Self::Condition { .. } => "IfExp",
            Self::Binding { .. } => "LetExp",
        }
    }

    /// A short, single line label for the node, without its children.
    pub fn label(&self) -> String {
        match self {
            Self::Variable(name) => name.clone(),
            Self::IntLiteral(value) => value.to_string(),
            Self::Minus { .. } => "minus".to_string(),
            Self::IsZero { .. } => "iszero".to_string(),
            Self::Condition { .. } => "if".to_string(),
            Self::Binding { name, .. } => format!("let {name}"),
        }
    }

    /// Render the tree one node per line as `text (Kind)`, one space of indent per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = " ".repeat(depth);
        let (text, kind) = match self {
            Self::Variable(name) => (name.clone(), "Identifier"),
            Self::IntLiteral(value) => (value.to_string(), "IntegerLiteral"),
            Self::Minus { .. } => ("minus".to_string(), "Minus"),
            Self::IsZero { .. } => ("iszero".to_string(), "IsZero"),
            Self::Condition { .. } => ("if".to_string(), "If"),
            Self::Binding { .. } => ("let".to_string(), "Let"),
        };
        out.push_str(&format!("{indent}{text} ({kind})\n"));

        if let Self::Binding { name, .. } = self {
            out.push_str(&format!("{indent} {name} (Identifier)\n"));
        }
        for child in self.children() {
            child.write_outline(out, depth + 1);
        }
    }

    /// Child expressions in program order.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Variable(_) | Self::IntLiteral(_) => Vec::new(),
            Self::Minus { first, second } => vec![&**first, &**second],
            Self::IsZero { value } => vec![&**value],
            Self::Condition { predicate, yes, no } => vec![&**predicate, &**yes, &**no],
            Self::Binding { value, body, .. } => vec![&**value, &**body],
        }
    }

    fn write_tree(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        depth: Option<usize>,
    ) -> std::fmt::Result {
        write!(f, "{}(", self.tree_name())?;
        match self {
            Self::Variable(name) => return write!(f, "\"{name}\")"),
            Self::IntLiteral(value) => return write!(f, "{value})"),
            _ => {}
        }

        let inner = depth.map(|depth| depth + 1);
        let mut position = 0;
        if let Self::Binding { name, .. } = self {
            start_item(f, position, inner)?;
            write!(f, "\"{name}\"")?;
            position += 1;
        }
        for child in self.children() {
            start_item(f, position, inner)?;
            child.write_tree(f, inner)?;
            position += 1;
        }
        if let Some(depth) = depth {
            write!(f, "\n{}", "    ".repeat(depth))?;
        }
        write!(f, ")")
    }
}

/// Separator and, in the multi-line layout, newline plus indent before an argument.
fn start_item(
    f: &mut std::fmt::Formatter<'_>,
    position: usize,
    depth: Option<usize>,
) -> std::fmt::Result {
    if position > 0 {
        write!(f, ",")?;
        if depth.is_none() {
            write!(f, " ")?;
        }
    }
    if let Some(depth) = depth {
        write!(f, "\n{}", "    ".repeat(depth))?;
    }
    Ok(())
}

/// Nested `DiffExp(ConstExp(1), VarExp("x"))` notation. The alternate form
/// (`{:#}`) puts each child of a composite node on its own indented line.
impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            self.write_tree(f, Some(0))
        } else {
            self.write_tree(f, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxExpr {
        Expression::binding(
            "x",
            Expression::int(5),
            Expression::minus(Expression::variable("x"), Expression::int(1)),
        )
    }

    #[test]
    fn display_leaves() {
        assert_eq!(Expression::int(-3).to_string(), "ConstExp(-3)");
        assert_eq!(Expression::variable("x").to_string(), "VarExp(\"x\")");
    }

    #[test]
    fn display_nested() {
        assert_eq!(
            sample().to_string(),
            "LetExp(\"x\", ConstExp(5), DiffExp(VarExp(\"x\"), ConstExp(1)))"
        );
    }

    #[test]
    fn display_alternate() {
        assert_eq!(
            format!("{:#}", sample()),
            "LetExp(
    \"x\",
    ConstExp(5),
    DiffExp(
        VarExp(\"x\"),
        ConstExp(1)
    )
)"
        );
    }

    #[test]
    fn outline_lists_every_node() {
        assert_eq!(
            sample().outline(),
            "let (Let)
 x (Identifier)
 5 (IntegerLiteral)
 minus (Minus)
  x (Identifier)
  1 (IntegerLiteral)
"
        );
    }

    #[test]
    fn children_in_program_order() {
        let expr = Expression::condition(
            Expression::is_zero(Expression::int(0)),
            Expression::int(1),
            Expression::int(2),
        );
        let labels: Vec<String> = expr.children().iter().map(|child| child.label()).collect();
        assert_eq!(labels, vec!["iszero", "1", "2"]);
    }
}
