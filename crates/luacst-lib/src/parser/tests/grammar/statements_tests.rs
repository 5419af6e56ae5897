use indoc::indoc;

use crate::parser::parse;

#[test]
fn empty_input() {
    let parse = parse("");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r"
    Chunk
      Block
        StatementList
    ");
}

#[test]
fn call_statement() {
    let parse = parse("f(x)");
    assert!(parse.is_valid());
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
                ExpressionList
                  NameRef
                    Ident "x"
                ParenClose ")"
    "#);
}

#[test]
fn method_call_is_call_statement() {
    let parse = parse("a.b()");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          CallStatement
            CallExpression
              IndexExpression
                NameRef
                  Ident "a"
                Dot "."
                Ident "b"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
    "#);
}

#[test]
fn assignment_statement() {
    let parse = parse("a.b = 1");
    assert!(parse.is_valid());
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
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
    "#);
}

#[test]
fn multiple_assignment() {
    let parse = parse("a, b = 1, 2");
    assert!(parse.is_valid());
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
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
              Comma ","
              NumberLiteral
                DecInt "2"
    "#);
}

#[test]
fn assignment_to_call_result_index() {
    let parse = parse("f().x = 1");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          AssignmentStatement
            VariableList
              Variable
                IndexExpression
                  CallExpression
                    NameRef
                      Ident "f"
                    ArgumentList
                      ParenOpen "("
                      ParenClose ")"
                  Dot "."
                  Ident "x"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
    "#);
}

#[test]
fn local_names() {
    let parse = parse("local x, y = 1");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          LocalNameStatement
            KwLocal "local"
            NameList
              Name
                Ident "x"
              Comma ","
              Name
                Ident "y"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
    "#);
}

#[test]
fn local_without_values() {
    let parse = parse("local x");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          LocalNameStatement
            KwLocal "local"
            NameList
              Name
                Ident "x"
    "#);
}

#[test]
fn local_function() {
    let parse = parse("local function f() end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          LocalFunctionStatement
            KwLocal "local"
            KwFunction "function"
            Name
              Ident "f"
            FunctionBody
              ParameterList
                ParenOpen "("
                ParenClose ")"
              Block
                StatementList
              KwEnd "end"
    "#);
}

#[test]
fn function_definition_with_method_name() {
    let parse = parse("function a.b:c(self) end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          FunctionDefinitionStatement
            KwFunction "function"
            FunctionName
              NameRef
                Ident "a"
              Dot "."
              Ident "b"
              Colon ":"
              Ident "c"
            FunctionBody
              ParameterList
                ParenOpen "("
                Name
                  Ident "self"
                ParenClose ")"
              Block
                StatementList
              KwEnd "end"
    "#);
}

#[test]
fn function_definition_with_plain_name() {
    let parse = parse("function f() end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          FunctionDefinitionStatement
            KwFunction "function"
            FunctionName
              Name
                Ident "f"
            FunctionBody
              ParameterList
                ParenOpen "("
                ParenClose ")"
              Block
                StatementList
              KwEnd "end"
    "#);
}

#[test]
fn simple_for() {
    let parse = parse("for i = 1, 10 do end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          SimpleForStatement
            KwFor "for"
            Name
              Ident "i"
            Equals "="
            NumberLiteral
              DecInt "1"
            Comma ","
            NumberLiteral
              DecInt "10"
            KwDo "do"
            Block
              StatementList
            KwEnd "end"
    "#);
}

#[test]
fn range_for() {
    let parse = parse("for k, v in pairs(t) do end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          RangeForStatement
            KwFor "for"
            NameList
              Name
                Ident "k"
              Comma ","
              Name
                Ident "v"
            KwIn "in"
            ExpressionList
              CallExpression
                NameRef
                  Ident "pairs"
                ArgumentList
                  ParenOpen "("
                  ExpressionList
                    NameRef
                      Ident "t"
                  ParenClose ")"
            KwDo "do"
            Block
              StatementList
            KwEnd "end"
    "#);
}

#[test]
fn range_for_with_single_name() {
    let parse = parse("for x in it do end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          RangeForStatement
            KwFor "for"
            NameList
              Name
                Ident "x"
            KwIn "in"
            ExpressionList
              NameRef
                Ident "it"
            KwDo "do"
            Block
              StatementList
            KwEnd "end"
    "#);
}

#[test]
fn if_elseif_else() {
    let parse = parse("if a then b() elseif c then else d() end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          IfStatement
            KwIf "if"
            NameRef
              Ident "a"
            KwThen "then"
            ThenBranch
              Block
                StatementList
                  CallStatement
                    CallExpression
                      NameRef
                        Ident "b"
                      ArgumentList
                        ParenOpen "("
                        ParenClose ")"
            ElseifBranch
              KwElseif "elseif"
              NameRef
                Ident "c"
              KwThen "then"
              Block
                StatementList
            ElseBranch
              KwElse "else"
              Block
                StatementList
                  CallStatement
                    CallExpression
                      NameRef
                        Ident "d"
                      ArgumentList
                        ParenOpen "("
                        ParenClose ")"
            KwEnd "end"
    "#);
}

#[test]
fn loops() {
    let input = indoc! {"
    while x do break end
    repeat until done
    "};

    let parse = parse(input);
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          WhileStatement
            KwWhile "while"
            NameRef
              Ident "x"
            KwDo "do"
            Block
              StatementList
                BreakStatement
                  KwBreak "break"
            KwEnd "end"
          RepeatStatement
            KwRepeat "repeat"
            Block
              StatementList
            KwUntil "until"
            NameRef
              Ident "done"
    "#);
}

#[test]
fn do_block() {
    let parse = parse("do local x end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          DoStatement
            KwDo "do"
            Block
              StatementList
                LocalNameStatement
                  KwLocal "local"
                  NameList
                    Name
                      Ident "x"
            KwEnd "end"
    "#);
}

#[test]
fn goto_and_label() {
    let input = indoc! {"
    goto continue
    ::continue::
    "};

    let parse = parse(input);
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          GotoStatement
            KwGoto "goto"
            Ident "continue"
          LabelStatement
            DoubleColon "::"
            Ident "continue"
            DoubleColon "::"
    "#);
}

#[test]
fn return_with_semicolon() {
    let parse = parse("return;");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          ReturnStatement
            KwReturn "return"
            Semicolon ";"
    "#);
}

#[test]
fn semicolons_between_statements() {
    let parse = parse(";a = 1;; b = 2");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          Semicolon ";"
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "a"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "1"
          Semicolon ";"
          Semicolon ";"
          AssignmentStatement
            VariableList
              Variable
                NameRef
                  Ident "b"
            Equals "="
            ExpressionList
              NumberLiteral
                DecInt "2"
    "#);
}

#[test]
fn parenthesized_call_statement() {
    let parse = parse("(f)()");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          CallStatement
            CallExpression
              ParenExpression
                ParenOpen "("
                NameRef
                  Ident "f"
                ParenClose ")"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
    "#);
}

#[test]
fn method_call_with_string_argument() {
    let parse = parse("obj:send 'hi'");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          CallStatement
            CallExpression
              IndexExpression
                NameRef
                  Ident "obj"
                Colon ":"
                Ident "send"
              ArgumentList
                StringLiteral
                  SingleQuotedString "'hi'"
    "#);
}

#[test]
fn return_closes_block() {
    let parse = parse("do return end");
    assert!(parse.is_valid());
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Chunk
      Block
        StatementList
          DoStatement
            KwDo "do"
            Block
              StatementList
                ReturnStatement
                  KwReturn "return"
            KwEnd "end"
    "#);
}
