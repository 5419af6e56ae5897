use indoc::indoc;

use crate::parser::parse;

#[test]
fn comments_and_whitespace_are_kept() {
    let input = "-- hi\nx = 1 -- trailing\n";

    let parse = parse(input);
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst_full(), @r#"
    Chunk
      LineComment "-- hi"
      Newline "\n"
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "x"
            Whitespace " "
            Equals "="
            Whitespace " "
            ExpressionList
              NumberLiteral
                DecInt "1"
      Whitespace " "
      LineComment "-- trailing"
      Newline "\n"
    "#);
}

#[test]
fn trivia_between_statements_goes_to_parent() {
    let input = "a()\n--[[ note ]]\nb()";

    let parse = parse(input);
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst_full(), @r#"
    Chunk
      Block
        StatementList
          CallStatement
            CallExpression
              NameRef
                Ident "a"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
          Newline "\n"
          BlockComment "--[[ note ]]"
          Newline "\n"
          CallStatement
            CallExpression
              NameRef
                Ident "b"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
    "#);
}

#[test]
fn only_trivia() {
    let input = "  -- nothing here\n";

    let parse = parse(input);
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst_full(), @r#"
    Chunk
      Whitespace "  "
      LineComment "-- nothing here"
      Newline "\n"
      Block
        StatementList
    "#);
}

#[test]
fn source_text_round_trips() {
    let input = indoc! {r#"
    -- module
    local M = {}

    function M.greet(name)
      print("hello, " .. name) -- say hi
    end

    return M
    "#};

    let parse = parse(input);
    assert!(parse.is_valid());
    assert_eq!(parse.syntax().to_string(), input);
}
