use crate::parser::parse;

#[test]
fn stray_end_then_statement() {
    let parse = parse("x = 1 end y = 2");
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
              NumberLiteral
                DecInt "1"
      Garbage
        KwEnd "end"
        AssignmentStatement
          VariableList
            Variable
              NameRef
                Ident "y"
          Equals "="
          ExpressionList
            NumberLiteral
              DecInt "2"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 6..9: statement expected");
}

#[test]
fn only_unexpected_tokens() {
    let parse = parse(") ) 1");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
      Garbage
        ParenClose ")"
        ParenClose ")"
        DecInt "1"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..1: statement expected");
}

#[test]
fn stray_until() {
    let parse = parse("local x = 1 until");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          LocalNameStatement
            KwLocal "local"
            NameList
              Name
                Ident "x"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
      Garbage
        KwUntil "until"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 12..17: statement expected");
}

#[test]
fn block_statement_inside_garbage() {
    let parse = parse("} do end");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
      Garbage
        BraceClose "}"
        DoStatement
          KwDo "do"
          Block
            StatementList
          KwEnd "end"
    "#);
    assert_eq!(parse.diagnostics().len(), 1);
}

#[test]
fn garbage_is_reported_once() {
    let parse = parse("end end end else elseif");
    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(parse.syntax().to_string(), "end end end else elseif");
}

#[test]
fn garbage_statements_accessor() {
    let parse = parse("f() ] g() h()");
    let chunk = parse.tree();

    assert_eq!(chunk.block().unwrap().statements().count(), 1);
    let garbage = chunk.garbage().unwrap();
    assert_eq!(garbage.statements().count(), 2);
}

#[test]
fn no_garbage_for_valid_input() {
    let parse = parse("f() g()");
    assert!(parse.tree().garbage().is_none());
    assert!(parse.is_valid());
}
