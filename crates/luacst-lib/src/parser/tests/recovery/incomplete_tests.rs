use indoc::indoc;

use crate::parser::{BareExpressionPolicy, ParserBuilder, parse};

#[test]
fn missing_end_of_if() {
    let parse = parse("if true then");
    assert!(!parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          IfStatement
            KwIf "if"
            BooleanLiteral
              KwTrue "true"
            KwThen "then"
            ThenBranch
              Block
                StatementList
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 12..12: 'end' expected (related: 'if' statement started here at 0..2)");
}

#[test]
fn missing_then() {
    let parse = parse("if x y() end");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 5..6: 'then' expected");
}

#[test]
fn missing_expression_after_equals() {
    let parse = parse("x = ");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "x"
            Equals "="
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 4..4: expression expected");
}

#[test]
fn missing_argument_after_comma() {
    let parse = parse("f(a, )");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 5..6: expression expected");
}

#[test]
fn missing_binary_operand() {
    let parse = parse("return 1 +");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
            ExpressionList
              BinaryExpression
                NumberLiteral
                  DecInt "1"
                BinaryOperator
                  Plus "+"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 10..10: expression expected");
}

#[test]
fn unclosed_paren() {
    let parse = parse("x = (1 + 2");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 10..10: ')' expected (related: '(' opened here at 4..5)");
}

#[test]
fn unclosed_function() {
    let parse = parse("function f()");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 12..12: 'end' expected (related: function started here at 0..8)");
}

#[test]
fn inner_block_closes_first() {
    let parse = parse("do do end");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 9..9: 'end' expected (related: 'do' block started here at 0..2)");
}

#[test]
fn repeat_without_until() {
    let parse = parse("repeat x()");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 10..10: 'until' expected (related: 'repeat' loop started here at 0..6)");
}

#[test]
fn local_without_name() {
    let parse = parse("local = 1");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 6..7: name expected");
}

#[test]
fn missing_field_between_separators() {
    let parse = parse("t = {1,,2}");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 7..8: expression expected");
}

#[test]
fn unclosed_table() {
    let parse = parse("t = { 1, 2");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 10..10: '}' expected (related: table opened here at 4..5)");
}

#[test]
fn unclosed_index() {
    let parse = parse("x = t[1");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 7..7: ']' expected (related: index opened here at 5..6)");
}

#[test]
fn one_diagnostic_per_position() {
    // Both the missing 'do' and the missing block closer point at EOF.
    let parse = parse("while x");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 7..7: 'do' expected");
}

#[test]
fn bare_expression_statement() {
    let parse = parse("a.b");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ExpressionStatement
            ExpressionList
              IndexExpression
                NameRef
                  Ident "a"
                Dot "."
                Ident "b"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..3: expression is not a statement");
}

#[test]
fn bare_binary_expression() {
    let parse = parse("x + 1");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..5: expression is not a statement");
}

#[test]
fn bare_expression_requiring_assignment() {
    let parse = ParserBuilder::new("a.b")
        .with_bare_expressions(BareExpressionPolicy::RequireAssignment)
        .parse();
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                IndexExpression
                  NameRef
                    Ident "a"
                  Dot "."
                  Ident "b"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 3..3: '=' expected");
}

#[test]
fn assignment_to_call() {
    let parse = parse("f() = 1");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..3: cannot assign to a function call");
}

#[test]
fn unfinished_string() {
    let parse = parse("x = \"abc");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "x"
            Equals "="
            ExpressionList
              StringLiteral
                DoubleQuotedString "\"abc"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 4..8: unfinished string");
}

#[test]
fn unfinished_long_comment() {
    let parse = parse("--[[ never closed");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..17: unfinished long comment");
}

#[test]
fn invalid_character_inside_arguments() {
    let parse = parse("f($)");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          CallStatement
            CallExpression
              NameRef
                Ident "f"
              ArgumentList
                ParenOpen "("
                Error
                  InvalidChar "$"
                ParenClose ")"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 2..3: unexpected character");
}

#[test]
fn invalid_character_at_start() {
    let parse = parse("$x = 1");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Error
        InvalidChar "$"
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "x"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..1: unexpected character");
}

#[test]
fn each_invalid_character_is_reported() {
    let parse = parse("x = 1 @@");
    insta::assert_snapshot!(parse.dump_diagnostics(), @r"
    error at 6..7: unexpected character
    error at 7..8: unexpected character
    ");
}

#[test]
fn several_problems() {
    let input = indoc! {"
    local t = { 1,
    function f(
    "};

    let parse = parse(input);
    assert_eq!(parse.syntax().to_string(), input);
    insta::assert_snapshot!(parse.dump_diagnostics(), @r"
    error at 24..25: '(' expected
    error at 27..27: ')' expected (related: argument list opened here at 25..26)
    ");
}

#[test]
fn method_reference_without_arguments() {
    let parse = parse("a.b:c = 1");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 6..7: arguments expected");
}

#[test]
fn bare_method_reference() {
    let parse = parse("obj:method");
    insta::assert_snapshot!(parse.dump_diagnostics(), @r"
    error at 0..10: expression is not a statement
    error at 10..10: arguments expected
    ");
}

#[test]
fn statement_after_return() {
    let parse = parse("return return");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
      Garbage
        KwReturn "return"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 7..13: statement expected");
}

#[test]
fn statement_after_return_in_function() {
    let parse = parse("function f() return 1 x = 2 end");
    insta::assert_snapshot!(parse.dump_diagnostics(), @r"
    error at 22..23: 'end' expected (related: function started here at 0..8)
    error at 28..31: statement expected
    ");
}

#[test]
fn target_list_without_equals() {
    let parse = parse("a, b");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "a"
              Comma ","
              Variable
                NameRef
                  Ident "b"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 4..4: '=' expected");
}

#[test]
fn call_among_targets() {
    let parse = parse("a, f() = 1, 2");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 3..6: cannot assign to a function call");
}
