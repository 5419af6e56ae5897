use crate::diagnostics::DiagnosticKind;
use crate::parser::cst::SyntaxKind;
use crate::parser::{Parse, ParserBuilder, parse};

fn has_error_node(parse: &Parse) -> bool {
    parse
        .syntax()
        .descendants()
        .any(|node| node.kind() == SyntaxKind::Error)
}

fn assert_bailed_out(input: &str, parse: &Parse) {
    assert_eq!(parse.syntax().to_string(), input);
    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(
        parse.diagnostics().as_slice()[0].kind(),
        DiagnosticKind::RecursionLimitExceeded
    );
    assert!(has_error_node(parse));
}

#[test]
fn custom_limit_on_nested_parens() {
    let input = format!("x = {}1{}", "(".repeat(100), ")".repeat(100));
    let parse = ParserBuilder::new(&input)
        .with_recursion_limit(Some(16))
        .parse();

    assert_bailed_out(&input, &parse);
    insta::assert_snapshot!(parse.diagnostics().as_slice()[0].message(), @"nesting too deep: limit is 16");
}

#[test]
fn within_custom_limit() {
    let parse = ParserBuilder::new("x = ((1))")
        .with_recursion_limit(Some(16))
        .parse();
    assert!(parse.is_valid());
}

#[test]
fn unlimited_recursion() {
    let input = format!("x = {}1{}", "(".repeat(50), ")".repeat(50));
    let parse = ParserBuilder::new(&input).with_recursion_limit(None).parse();
    assert!(parse.is_valid());
    assert!(!has_error_node(&parse));
}

#[test]
fn deep_parens_with_default_limit() {
    let input = format!("x = {}{}", "(".repeat(10_000), ")".repeat(10_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
    insta::assert_snapshot!(parse.diagnostics().as_slice()[0].message(), @"nesting too deep: limit is 128");
}

#[test]
fn deep_parens_at_statement_start() {
    let input = format!("{}x{}", "(".repeat(300), ")".repeat(300));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn long_unary_chain() {
    let input = format!("x = {}1", "- ".repeat(10_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn long_concat_chain() {
    let input = format!("x = a{}", " .. a".repeat(10_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn long_power_chain() {
    let input = format!("x = 2{}", " ^ 2".repeat(5_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn deep_blocks() {
    let input = format!("{}{}", "do ".repeat(1_000), "end ".repeat(1_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn deep_tables() {
    let input = format!("t = {}{}", "{".repeat(1_000), "}".repeat(1_000));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn long_left_associative_chain_is_fine() {
    let input = format!("x = 1{}", " + 1".repeat(1_000));
    let parse = parse(&input);
    assert!(parse.is_valid());
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn many_statements_are_fine() {
    let input = "x = x + 1\n".repeat(5_000);
    let parse = parse(&input);
    assert!(parse.is_valid());
    assert_eq!(parse.tree().block().unwrap().statements().count(), 5_000);
}

#[test]
fn nothing_reported_after_bail_out() {
    let input = format!("x = {}1 $ @ end", "(".repeat(200));
    let parse = parse(&input);
    assert_bailed_out(&input, &parse);
}

#[test]
fn nested_function_indexes_in_assignments() {
    let depth = 30;
    let input = format!(
        "{}b = 1{}",
        "a[function() ".repeat(depth),
        " end] = 1".repeat(depth)
    );
    let parse = parse(&input);
    assert!(parse.is_valid());
    assert_eq!(parse.syntax().to_string(), input);
}

#[test]
fn nested_function_indexes_in_bare_expressions() {
    let depth = 30;
    let input = format!("{}b.c{}", "a[function() ".repeat(depth), " end]".repeat(depth));
    let parse = parse(&input);
    assert_eq!(parse.syntax().to_string(), input);
    assert_eq!(parse.diagnostics().len(), depth + 1);
    assert!(
        parse
            .diagnostics()
            .iter()
            .all(|d| d.kind() == DiagnosticKind::BareExpression)
    );
}
