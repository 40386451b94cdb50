// Integration tests for the tinyfront parser

use tinyfront::parser::ast::Qualifiers;
use tinyfront::parser::{parse_source, AstNode, Literal, NodeKind, Operator, ParseError, Parser};

fn int(n: i32) -> AstNode {
    AstNode::value(Literal::Int(n))
}

#[test]
fn test_return_of_addition() {
    let program = parse_source("return 1 + 2;").expect("Parsing failed");

    let expected = AstNode::body(vec![AstNode::return_stmt(Some(AstNode::binary(
        Operator::Plus,
        int(1),
        int(2),
    )))]);
    assert_eq!(program, expected);
}

#[test]
fn test_precedence_and_associativity() {
    let mut parser = Parser::from_source("1 + 2 * 3");
    let sum = parser.parse_expression().expect("Parsing failed");
    match &sum {
        AstNode::DataOperation {
            op: Operator::Plus,
            right,
            ..
        } => assert!(matches!(
            right.as_ref(),
            AstNode::DataOperation {
                op: Operator::Multiply,
                ..
            }
        )),
        other => panic!("Expected addition at the root, got {}", other),
    }

    let mut parser = Parser::from_source("1 - 2 - 3");
    let difference = parser.parse_expression().expect("Parsing failed");
    assert_eq!(
        difference,
        AstNode::binary(
            Operator::Minus,
            AstNode::binary(Operator::Minus, int(1), int(2)),
            int(3)
        )
    );
}

#[test]
fn test_parentheses_only_change_shape() {
    fn leaves(node: &AstNode, out: &mut Vec<String>) {
        if node.children().is_empty() {
            out.push(node.to_string());
        }
        for child in node.children() {
            leaves(child, out);
        }
    }

    let grouped = Parser::from_source("(1 + 2) * 3").parse_expression().unwrap();
    let flat = Parser::from_source("1 + 2 * 3").parse_expression().unwrap();
    assert_ne!(grouped, flat);

    let (mut a, mut b) = (Vec::new(), Vec::new());
    leaves(&grouped, &mut a);
    leaves(&flat, &mut b);
    assert_eq!(a, b);
}

#[test]
fn test_if_else_both_branches() {
    let program = parse_source("if (1) { return 1; } else { return 2; }").expect("Parsing failed");

    let AstNode::Body { elements } = &program else {
        panic!("Expected program body");
    };
    match &elements[0] {
        AstNode::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.kind(), NodeKind::Body);
            assert_eq!(else_branch.as_ref().map(|b| b.kind()), Some(NodeKind::Body));
        }
        other => panic!("Expected if, got {}", other),
    }
}

#[test]
fn test_empty_for_with_break() {
    let program = parse_source("for (;;) { break; }").expect("Parsing failed");
    assert_eq!(
        program,
        AstNode::body(vec![AstNode::for_stmt(
            None,
            None,
            None,
            AstNode::body(vec![AstNode::break_stmt()])
        )])
    );
}

#[test]
fn test_missing_closing_brace_fails() {
    let result = parse_source("if (1) { return 1; ");
    match result {
        Err(ParseError::Unexpected {
            expected, found, ..
        }) => {
            assert_eq!(expected, "'}' to close block");
            assert_eq!(found, "end of file");
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_single_pipe_parses_as_logical_or() {
    let single = parse_source("x = a | b;").expect("Parsing failed");
    let double = parse_source("x = a || b;").expect("Parsing failed");

    assert_eq!(single, double);
    assert_eq!(single.to_string(), "(block (= x (|| a b)))");
}

#[test]
fn test_vertical_tab_separates_tokens() {
    let program = parse_source("return\x0Ba\x0C+\x0Bb;").expect("Parsing failed");
    assert_eq!(program.to_string(), "(block (return (+ a b)))");
}

#[test]
fn test_unterminated_string_fails_the_parse() {
    let err = parse_source("x = \"abc;").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert!(err.to_string().contains("unterminated string literal"));
}

#[test]
fn test_complete_program() {
    let source = r#"
        import std.io;

        static const int LIMIT = 10;
        define greeting = "hello";

        fun sum(int[] xs, int n) -> long {
            long total = 0;
            for (i = 0; i < n; i = i + 1) {
                total = total + xs[i];
            }
            return total;
        }

        fun main() -> int {
            int[3] values = {1, 2, 3};
            int* p = &values;
            if (sum(values, 3) >= LIMIT && !(*p == 0)) {
                print(greeting);
            } else {
                return 1;
            }
            return 0;
        }
    "#;

    let program = parse_source(source).expect("Parsing failed");
    let AstNode::Body { elements } = &program else {
        panic!("Expected program body");
    };

    let kinds: Vec<NodeKind> = elements.iter().map(AstNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Import,
            NodeKind::Define,
            NodeKind::Define,
            NodeKind::Function,
            NodeKind::Function,
        ]
    );

    assert_eq!(elements[0].to_string(), "(import std.io)");
    assert_eq!(
        elements[1],
        AstNode::define(
            Some(AstNode::identifier("int")),
            "LIMIT",
            Some(int(10)),
            Qualifiers {
                is_const: true,
                is_static: true
            }
        )
    );
    assert_eq!(elements[2].to_string(), "(define greeting \"hello\")");

    match &elements[3] {
        AstNode::Function {
            name,
            return_type,
            params,
            ..
        } => {
            assert_eq!(name, "sum");
            assert_eq!(
                return_type.as_deref(),
                Some(&AstNode::identifier("long"))
            );
            assert_eq!(
                params.to_string(),
                "(block (define (array int _ _) xs) (define int n))"
            );
        }
        other => panic!("Expected function, got {}", other),
    }

    assert!(program.node_count() > 50);
}

#[test]
fn test_all_node_kinds_reachable_from_source() {
    let source = r#"
        import a;
        define x = 1;
        int* p = &x;
        int[2] xs = {x, 2};
        fun f() { return; }
        f();
        xs[0] = -x;
        if (x) { } 
        for (;;) { continue; break; }
    "#;

    fn collect(node: &AstNode, out: &mut Vec<NodeKind>) {
        if !out.contains(&node.kind()) {
            out.push(node.kind());
        }
        for child in node.children() {
            collect(child, out);
        }
    }

    let program = parse_source(source).expect("Parsing failed");
    let mut seen = Vec::new();
    collect(&program, &mut seen);
    assert_eq!(seen.len(), 17, "missing kinds, saw {:?}", seen);
}
