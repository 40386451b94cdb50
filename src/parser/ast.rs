// AST (Abstract Syntax Tree) definitions for the tinyfront language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Primitive data types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    String,
}

impl DataType {
    /// Keyword spelling of the type
    pub fn name(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }
}

/// A literal value. Exactly one arm is live; text is owned by the holder.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

impl Literal {
    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Int(_) => DataType::Int,
            Literal::Long(_) => DataType::Long,
            Literal::Float(_) => DataType::Float,
            Literal::Double(_) => DataType::Double,
            Literal::Text(_) => DataType::String,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Long(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" so floats never read as integers
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Double(x) => write!(f, "{:?}", x),
            Literal::Text(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// Operators carried by assignment and data operation nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    // Logical
    And,
    Or,
    Not,
    // Comparison
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,

    Assign,

    // Pointer
    Dereference,
    Address,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Assign => "=",
            Operator::Dereference => "*",
            Operator::Address => "&",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `const` / `static` qualifiers on definitions and functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_static: bool,
}

impl Qualifiers {
    pub fn is_empty(self) -> bool {
        !self.is_const && !self.is_static
    }
}

/// Fieldless tag naming the active variant of an [`AstNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Identifier,
    Value,
    Assignment,
    Define,
    Pointer,
    Body,
    Array,
    ArrayAccess,
    Function,
    Call,
    DataOperation,
    If,
    For,
    Break,
    Continue,
    Return,
    Import,
}

/// AST nodes representing statements, expressions and type positions.
///
/// Every child is exclusively owned by its parent, so the tree is released
/// exactly once, recursively, when the root is dropped. Type positions hold
/// an `Identifier` naming a primitive type, a `Pointer` wrapping a type, or
/// an `Array`.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Identifier {
        name: String,
    },
    Value(Literal),
    Assignment {
        target: Box<AstNode>,
        value: Box<AstNode>,
        op: Operator,
    },
    Define {
        var_type: Option<Box<AstNode>>,
        name: String,
        init: Option<Box<AstNode>>,
        qualifiers: Qualifiers,
    },
    Pointer {
        pointee: Box<AstNode>,
    },
    Body {
        elements: Vec<AstNode>,
    },
    Array {
        element_type: Box<AstNode>,
        size: Option<Box<AstNode>>,
        elements: Option<Box<AstNode>>,
    },
    ArrayAccess {
        name: String,
        index: Box<AstNode>,
    },
    Function {
        name: String,
        return_type: Option<Box<AstNode>>,
        params: Box<AstNode>,
        body: Box<AstNode>,
        qualifiers: Qualifiers,
    },
    Call {
        callee: Box<AstNode>,
        args: Box<AstNode>,
    },
    /// Binary operation, or unary when `left` is absent
    DataOperation {
        op: Operator,
        left: Option<Box<AstNode>>,
        right: Box<AstNode>,
    },
    If {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
    },
    For {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        increment: Option<Box<AstNode>>,
        body: Box<AstNode>,
    },
    Break,
    Continue,
    Return {
        value: Option<Box<AstNode>>,
    },
    Import {
        module: Box<AstNode>,
    },
}

fn boxed(node: Option<AstNode>) -> Option<Box<AstNode>> {
    node.map(Box::new)
}

// Constructors. Each takes ownership of its child nodes and copies text.
impl AstNode {
    pub fn identifier(name: &str) -> Self {
        AstNode::Identifier {
            name: name.to_owned(),
        }
    }

    pub fn value(literal: Literal) -> Self {
        AstNode::Value(literal)
    }

    pub fn assignment(target: AstNode, value: AstNode) -> Self {
        AstNode::Assignment {
            target: Box::new(target),
            value: Box::new(value),
            op: Operator::Assign,
        }
    }

    pub fn define(
        var_type: Option<AstNode>,
        name: &str,
        init: Option<AstNode>,
        qualifiers: Qualifiers,
    ) -> Self {
        AstNode::Define {
            var_type: boxed(var_type),
            name: name.to_owned(),
            init: boxed(init),
            qualifiers,
        }
    }

    pub fn pointer(pointee: AstNode) -> Self {
        AstNode::Pointer {
            pointee: Box::new(pointee),
        }
    }

    pub fn body(elements: Vec<AstNode>) -> Self {
        AstNode::Body { elements }
    }

    pub fn array(
        element_type: AstNode,
        size: Option<AstNode>,
        elements: Option<Vec<AstNode>>,
    ) -> Self {
        AstNode::Array {
            element_type: Box::new(element_type),
            size: boxed(size),
            elements: elements.map(|list| Box::new(AstNode::body(list))),
        }
    }

    pub fn array_access(name: &str, index: AstNode) -> Self {
        AstNode::ArrayAccess {
            name: name.to_owned(),
            index: Box::new(index),
        }
    }

    pub fn function(
        name: &str,
        return_type: Option<AstNode>,
        params: Vec<AstNode>,
        body: AstNode,
        qualifiers: Qualifiers,
    ) -> Self {
        AstNode::Function {
            name: name.to_owned(),
            return_type: boxed(return_type),
            params: Box::new(AstNode::body(params)),
            body: Box::new(body),
            qualifiers,
        }
    }

    pub fn call(callee: AstNode, args: Vec<AstNode>) -> Self {
        AstNode::Call {
            callee: Box::new(callee),
            args: Box::new(AstNode::body(args)),
        }
    }

    pub fn binary(op: Operator, left: AstNode, right: AstNode) -> Self {
        AstNode::DataOperation {
            op,
            left: Some(Box::new(left)),
            right: Box::new(right),
        }
    }

    pub fn unary(op: Operator, operand: AstNode) -> Self {
        AstNode::DataOperation {
            op,
            left: None,
            right: Box::new(operand),
        }
    }

    pub fn if_stmt(condition: AstNode, then_branch: AstNode, else_branch: Option<AstNode>) -> Self {
        AstNode::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: boxed(else_branch),
        }
    }

    pub fn for_stmt(
        init: Option<AstNode>,
        condition: Option<AstNode>,
        increment: Option<AstNode>,
        body: AstNode,
    ) -> Self {
        AstNode::For {
            init: boxed(init),
            condition: boxed(condition),
            increment: boxed(increment),
            body: Box::new(body),
        }
    }

    pub fn break_stmt() -> Self {
        AstNode::Break
    }

    pub fn continue_stmt() -> Self {
        AstNode::Continue
    }

    pub fn return_stmt(value: Option<AstNode>) -> Self {
        AstNode::Return {
            value: boxed(value),
        }
    }

    pub fn import(module: AstNode) -> Self {
        AstNode::Import {
            module: Box::new(module),
        }
    }
}

impl AstNode {
    /// Tag of the active variant
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Identifier { .. } => NodeKind::Identifier,
            AstNode::Value(_) => NodeKind::Value,
            AstNode::Assignment { .. } => NodeKind::Assignment,
            AstNode::Define { .. } => NodeKind::Define,
            AstNode::Pointer { .. } => NodeKind::Pointer,
            AstNode::Body { .. } => NodeKind::Body,
            AstNode::Array { .. } => NodeKind::Array,
            AstNode::ArrayAccess { .. } => NodeKind::ArrayAccess,
            AstNode::Function { .. } => NodeKind::Function,
            AstNode::Call { .. } => NodeKind::Call,
            AstNode::DataOperation { .. } => NodeKind::DataOperation,
            AstNode::If { .. } => NodeKind::If,
            AstNode::For { .. } => NodeKind::For,
            AstNode::Break => NodeKind::Break,
            AstNode::Continue => NodeKind::Continue,
            AstNode::Return { .. } => NodeKind::Return,
            AstNode::Import { .. } => NodeKind::Import,
        }
    }

    /// Directly owned children, in source order. Absent optional slots are skipped.
    pub fn children(&self) -> Vec<&AstNode> {
        fn push<'a>(out: &mut Vec<&'a AstNode>, node: &'a Option<Box<AstNode>>) {
            if let Some(node) = node {
                out.push(node);
            }
        }

        let mut out = Vec::new();
        match self {
            AstNode::Identifier { .. } | AstNode::Value(_) | AstNode::Break | AstNode::Continue => {}
            AstNode::Assignment { target, value, .. } => {
                out.push(&**target);
                out.push(&**value);
            }
            AstNode::Define { var_type, init, .. } => {
                push(&mut out, var_type);
                push(&mut out, init);
            }
            AstNode::Pointer { pointee } => out.push(&**pointee),
            AstNode::Body { elements } => out.extend(elements.iter()),
            AstNode::Array {
                element_type,
                size,
                elements,
            } => {
                out.push(&**element_type);
                push(&mut out, size);
                push(&mut out, elements);
            }
            AstNode::ArrayAccess { index, .. } => out.push(&**index),
            AstNode::Function {
                return_type,
                params,
                body,
                ..
            } => {
                out.push(&**params);
                push(&mut out, return_type);
                out.push(&**body);
            }
            AstNode::Call { callee, args } => {
                out.push(&**callee);
                out.push(&**args);
            }
            AstNode::DataOperation { left, right, .. } => {
                push(&mut out, left);
                out.push(&**right);
            }
            AstNode::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(&**condition);
                out.push(&**then_branch);
                push(&mut out, else_branch);
            }
            AstNode::For {
                init,
                condition,
                increment,
                body,
            } => {
                push(&mut out, init);
                push(&mut out, condition);
                push(&mut out, increment);
                out.push(&**body);
            }
            AstNode::Return { value } => push(&mut out, value),
            AstNode::Import { module } => out.push(&**module),
        }
        out
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(AstNode::node_count)
            .sum::<usize>()
    }

    /// One-line description of this node without its children
    pub fn label(&self) -> String {
        match self {
            AstNode::Identifier { name } => format!("Identifier {}", name),
            AstNode::Value(literal) => {
                format!("Value {} : {}", literal, literal.data_type().name())
            }
            AstNode::Assignment { op, .. } => format!("Assignment {}", op),
            AstNode::Define {
                name, qualifiers, ..
            } => format!("Define {}{}", name, qualifier_suffix(*qualifiers)),
            AstNode::Pointer { .. } => "Pointer".to_string(),
            AstNode::Body { elements } => format!("Body [{}]", elements.len()),
            AstNode::Array { .. } => "Array".to_string(),
            AstNode::ArrayAccess { name, .. } => format!("ArrayAccess {}", name),
            AstNode::Function {
                name, qualifiers, ..
            } => format!("Function {}{}", name, qualifier_suffix(*qualifiers)),
            AstNode::Call { .. } => "Call".to_string(),
            AstNode::DataOperation { op, left, .. } => {
                let arity = if left.is_some() { "binary" } else { "unary" };
                format!("DataOperation {} ({})", op, arity)
            }
            AstNode::If { .. } => "If".to_string(),
            AstNode::For { .. } => "For".to_string(),
            AstNode::Break => "Break".to_string(),
            AstNode::Continue => "Continue".to_string(),
            AstNode::Return { .. } => "Return".to_string(),
            AstNode::Import { .. } => "Import".to_string(),
        }
    }

    /// Indented outline of the subtree, one node per line
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(0, &mut lines);
        lines
    }

    fn outline_into(&self, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), self.label()));
        for child in self.children() {
            child.outline_into(depth + 1, lines);
        }
    }
}

fn qualifier_suffix(qualifiers: Qualifiers) -> &'static str {
    if qualifiers.is_empty() {
        return "";
    }
    match (qualifiers.is_const, qualifiers.is_static) {
        (true, true) => " (const static)",
        (true, false) => " (const)",
        (false, _) => " (static)",
    }
}

struct Slot<'a>(&'a Option<Box<AstNode>>);

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => write!(f, "{}", node),
            None => f.write_str("_"),
        }
    }
}

/// Compact S-expression rendering, e.g. `(+ 1 (* 2 3))`
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Identifier { name } => f.write_str(name),
            AstNode::Value(literal) => write!(f, "{}", literal),
            AstNode::Assignment { target, value, op } => {
                write!(f, "({} {} {})", op, target, value)
            }
            AstNode::Define {
                var_type,
                name,
                init,
                qualifiers,
            } => {
                f.write_str("(define")?;
                if qualifiers.is_const {
                    f.write_str(" const")?;
                }
                if qualifiers.is_static {
                    f.write_str(" static")?;
                }
                if let Some(ty) = var_type {
                    write!(f, " {}", ty)?;
                }
                write!(f, " {}", name)?;
                if let Some(init) = init {
                    write!(f, " {}", init)?;
                }
                f.write_str(")")
            }
            AstNode::Pointer { pointee } => write!(f, "(ptr {})", pointee),
            AstNode::Body { elements } => {
                f.write_str("(block")?;
                for element in elements {
                    write!(f, " {}", element)?;
                }
                f.write_str(")")
            }
            AstNode::Array {
                element_type,
                size,
                elements,
            } => write!(f, "(array {} {} {})", element_type, Slot(size), Slot(elements)),
            AstNode::ArrayAccess { name, index } => write!(f, "(index {} {})", name, index),
            AstNode::Function {
                name,
                return_type,
                params,
                body,
                qualifiers,
            } => {
                f.write_str("(fun")?;
                if qualifiers.is_const {
                    f.write_str(" const")?;
                }
                if qualifiers.is_static {
                    f.write_str(" static")?;
                }
                write!(f, " {} {} {} {})", name, params, Slot(return_type), body)
            }
            AstNode::Call { callee, args } => {
                write!(f, "(call {}", callee)?;
                for arg in args.children() {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
            AstNode::DataOperation { op, left, right } => match left {
                Some(left) => write!(f, "({} {} {})", op, left, right),
                None => write!(f, "({} {})", op, right),
            },
            AstNode::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => {
                    write!(f, "(if {} {} {})", condition, then_branch, else_branch)
                }
                None => write!(f, "(if {} {})", condition, then_branch),
            },
            AstNode::For {
                init,
                condition,
                increment,
                body,
            } => write!(
                f,
                "(for {} {} {} {})",
                Slot(init),
                Slot(condition),
                Slot(increment),
                body
            ),
            AstNode::Break => f.write_str("(break)"),
            AstNode::Continue => f.write_str("(continue)"),
            AstNode::Return { value } => match value {
                Some(value) => write!(f, "(return {})", value),
                None => f.write_str("(return)"),
            },
            AstNode::Import { module } => write!(f, "(import {})", module),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_node_has_no_children() {
        let node = AstNode::break_stmt();
        assert_eq!(node.kind(), NodeKind::Break);
        assert!(node.children().is_empty());
        assert_eq!(node.node_count(), 1);
        drop(node);
    }

    #[test]
    fn test_constructors_copy_text() {
        let mut name = String::from("counter");
        let node = AstNode::identifier(&name);
        name.push_str("_changed");

        match &node {
            AstNode::Identifier { name } => assert_eq!(name, "counter"),
            _ => panic!("Expected identifier node"),
        }
    }

    #[test]
    fn test_unary_operation_has_no_left_operand() {
        let node = AstNode::unary(Operator::Not, AstNode::identifier("x"));
        match &node {
            AstNode::DataOperation { op, left, right } => {
                assert_eq!(*op, Operator::Not);
                assert!(left.is_none());
                assert_eq!(right.kind(), NodeKind::Identifier);
            }
            _ => panic!("Expected data operation"),
        }
        assert_eq!(node.to_string(), "(! x)");
    }

    #[test]
    fn test_display_nested_tree() {
        let sum = AstNode::binary(
            Operator::Plus,
            AstNode::value(Literal::Int(1)),
            AstNode::binary(
                Operator::Multiply,
                AstNode::value(Literal::Int(2)),
                AstNode::value(Literal::Double(3.5)),
            ),
        );
        assert_eq!(sum.to_string(), "(+ 1 (* 2 3.5))");
        assert_eq!(sum.node_count(), 5);
    }

    #[test]
    fn test_for_display_marks_absent_slots() {
        let node = AstNode::for_stmt(None, None, None, AstNode::body(vec![AstNode::break_stmt()]));
        assert_eq!(node.to_string(), "(for _ _ _ (block (break)))");
    }

    #[test]
    fn test_outline_indents_children() {
        let node = AstNode::return_stmt(Some(AstNode::value(Literal::Text("hi".into()))));
        assert_eq!(node.outline(), vec!["Return", "  Value \"hi\" : string"]);
    }

    #[test]
    fn test_array_wraps_elements_in_body() {
        let node = AstNode::array(
            AstNode::identifier("int"),
            Some(AstNode::value(Literal::Int(2))),
            Some(vec![AstNode::value(Literal::Int(7)), AstNode::value(Literal::Int(8))]),
        );
        assert_eq!(node.to_string(), "(array int 2 (block 7 8))");
        assert_eq!(node.node_count(), 6);
    }

    #[test]
    fn test_labels_show_qualifiers() {
        let plain = Qualifiers::default();
        assert!(plain.is_empty());
        assert_eq!(AstNode::define(None, "x", None, plain).label(), "Define x");

        let both = Qualifiers {
            is_const: true,
            is_static: true,
        };
        assert!(!both.is_empty());
        assert_eq!(
            AstNode::define(None, "x", None, both).label(),
            "Define x (const static)"
        );

        let only_static = Qualifiers {
            is_const: false,
            is_static: true,
        };
        let function = AstNode::function("f", None, Vec::new(), AstNode::body(Vec::new()), only_static);
        assert_eq!(function.label(), "Function f (static)");
    }
}
