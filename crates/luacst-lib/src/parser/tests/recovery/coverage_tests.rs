use indoc::indoc;

use crate::parser::cst::SyntaxKind;
use crate::parser::parse;

/// Parses `input` and checks that the tree spells it back exactly and that every
/// diagnostic lies within it.
fn check(input: &str) {
    let parse = parse(input);
    assert_eq!(parse.syntax().to_string(), input, "round trip failed for {input:?}");
    assert_eq!(parse.syntax().kind(), SyntaxKind::Chunk);

    let len = input.len() as u32;
    for diagnostic in parse.diagnostics() {
        let range = diagnostic.range();
        assert!(
            u32::from(range.end()) <= len,
            "diagnostic {diagnostic} outside of {input:?}"
        );
    }
}

#[test]
fn empty_and_blank() {
    for input in ["", " ", "\n", "\r\n", "\t\t", ";", ";;;"] {
        check(input);
    }
}

#[test]
fn truncated_constructs() {
    let inputs = [
        "(", "((((", ")", "[", "]", "{", "}", "[[", "]]", "--[==[", "--[", "'", "\"", "'\\",
        "\"\\\n", "0x", "1e", "1e+", ".", "..", "...", "....", ":", "::", "::x", "::x:",
        "goto", "break break", "for", "for x", "for x,", "for x =", "for x = 1",
        "for x = 1,", "for x = 1, 2", "for a, b in", "for a, b in t do", "function",
        "function (", "function f(", "function f(a,", "function f(...,", "function a.",
        "function a:", "function a:b", "local", "local function", "local function (",
        "local x,", "local x =", "a.", "a:", "a:b", "a[", "a[1", "a[1]", "{[", "{[1]",
        "{[1] =", "{x=", "{x", "{,", "if", "if x", "if x then", "if x then else",
        "if x then elseif", "elseif", "else", "until", "return return", "return,",
        "while", "while x do", "repeat", "repeat until", "x =", "x, =", ", x = 1",
        "f(", "f(a", "f(a,", "f'", "f{", "not", "not not", "- -", "#", "~", "1 +",
        "1 ^", "1 ..", "a and", "a or or b",
    ];
    for input in inputs {
        check(input);
    }
}

#[test]
fn odd_characters() {
    for input in [
        "\0", "€", "\u{feff}x = 1", "x = 1 \u{1F600}", "$$$", "@ ! ` ?", "x = \"\u{0}\"",
        "a\u{00a0}b", "\r", "\r\r\n\n",
    ] {
        check(input);
    }
}

#[test]
fn every_prefix_of_a_program() {
    let program = indoc! {r#"
    local M = {}

    --[[ module state ]]
    local count, names = 0, { "a", [2] = 'b', c = [[long]] }

    function M.add(name, ...)
      count = count + 1
      names[#names + 1] = name
      if count > 10 then return nil, "too many" elseif count == 5 then goto five end
      ::five::
      for i = 1, count, 2 do print(i ^ -2 .. "x") end
      for k, v in pairs(names) do repeat local _ = k until v ~= nil end
      return (function(...) return select('#', ...) end)(...)
    end

    while not M.done do M:step() end
    return M
    "#};

    for (end, _) in program.char_indices() {
        check(&program[..end]);
    }
    check(program);
    assert!(parse(program).is_valid());
}

#[test]
fn token_soup() {
    let pieces = [
        "local", "x", "=", "(", ")", "{", "}", "[", "]", "end", "function", ",", ";", "..",
        "'s'", "1", "if", "then", "::", "...", "#", "$", "--c\n", "\n",
    ];

    // Deterministic walk over piece combinations.
    let mut state = 7u32;
    for _ in 0..500 {
        let mut input = String::new();
        for _ in 0..12 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let piece = pieces[(state >> 16) as usize % pieces.len()];
            input.push_str(piece);
            input.push(' ');
        }
        check(&input);
    }
}

#[test]
fn error_nodes_keep_their_text() {
    let input = "x = $ + @";
    let parse = parse(input);
    let errors: Vec<_> = parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Error)
        .map(|node| node.text().to_string())
        .collect();
    assert_eq!(errors, vec!["$", "@"]);
}
