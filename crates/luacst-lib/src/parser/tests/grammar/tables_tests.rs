use crate::parser::parse;

#[test]
fn empty_table() {
    let parse = parse("t = {}");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "t"
            Equals "="
            ExpressionList
              TableExpression
                BraceOpen "{"
                BraceClose "}"
    "#);
}

#[test]
fn mixed_fields_with_trailing_separator() {
    let parse = parse("return { 1, x = 2; [k] = 3, }");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
            ExpressionList
              TableExpression
                BraceOpen "{"
                TableField
                  NumberLiteral
                    DecInt "1"
                TableFieldSeparator
                  Comma ","
                TableField
                  Ident "x"
                  Equals "="
                  NumberLiteral
                    DecInt "2"
                TableFieldSeparator
                  Semicolon ";"
                TableField
                  BracketOpen "["
                  NameRef
                    Ident "k"
                  BracketClose "]"
                  Equals "="
                  NumberLiteral
                    DecInt "3"
                TableFieldSeparator
                  Comma ","
                BraceClose "}"
    "#);
}

#[test]
fn name_without_equals_is_positional() {
    let parse = parse("return { x, y.z }");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
            ExpressionList
              TableExpression
                BraceOpen "{"
                TableField
                  NameRef
                    Ident "x"
                TableFieldSeparator
                  Comma ","
                TableField
                  IndexExpression
                    NameRef
                      Ident "y"
                    Dot "."
                    Ident "z"
                BraceClose "}"
    "#);
}

#[test]
fn nested_tables() {
    let parse = parse("return { { a = {} } }");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
            ExpressionList
              TableExpression
                BraceOpen "{"
                TableField
                  TableExpression
                    BraceOpen "{"
                    TableField
                      Ident "a"
                      Equals "="
                      TableExpression
                        BraceOpen "{"
                        BraceClose "}"
                    BraceClose "}"
                BraceClose "}"
    "#);
}

#[test]
fn field_values_are_expressions() {
    let parse = parse("return { f = function() end, n = -1 }");
    assert!(parse.is_valid());

    let tree = parse.tree();
    let table = tree
        .as_cst()
        .descendants()
        .find_map(crate::parser::ast::TableExpression::cast)
        .unwrap();
    let names: Vec<_> = table
        .fields()
        .map(|f| f.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, ["f", "n"]);
}
