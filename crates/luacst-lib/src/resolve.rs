//! Name resolution and rename over the syntax tree.
//!
//! Resolution is lexical and textual: from a use site, walk up through the
//! enclosing scopes and take the first declaration with the same text.

use crate::parser::ast::{Expr, Name, NameRef, Stmt};
use crate::parser::cst::{SyntaxKind, SyntaxNode};
use crate::parser::parse;
use crate::{Error, Result};

fn is_scope(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Chunk
            | SyntaxKind::Block
            | SyntaxKind::FunctionDefinitionStatement
            | SyntaxKind::LocalFunctionStatement
            | SyntaxKind::FunctionBody
            | SyntaxKind::SimpleForStatement
            | SyntaxKind::RangeForStatement
    )
}

/// Declaration that `name_ref` refers to.
///
/// Names inside an index chain such as `a.b` or `t[k]` are not resolved.
pub fn resolve(name_ref: &NameRef) -> Option<Name> {
    let node = name_ref.as_cst();
    if node
        .parent()
        .is_some_and(|p| p.kind() == SyntaxKind::IndexExpression)
    {
        return None;
    }

    let text = name_ref.ident()?.text().to_string();
    node.ancestors()
        .filter(|scope| is_scope(scope.kind()))
        .find_map(|scope| {
            scope
                .descendants()
                .filter_map(Name::cast)
                .find(|name| name.text() == text)
        })
}

/// Renames the declaration `node` to `new_name`, returning the root of the edited tree.
///
/// The replacement identifier is taken from a parse of `<new_name> = nil`, so only
/// text that lexes as a single identifier is accepted.
pub fn rename(node: &SyntaxNode, new_name: &str) -> Result<SyntaxNode> {
    let name = Name::cast(node.clone()).ok_or(Error::NotADeclaration)?;
    let old = name.ident().ok_or(Error::NotADeclaration)?;
    let new = identifier_token(new_name).ok_or_else(|| Error::InvalidName(new_name.to_string()))?;

    tracing::debug!(from = old.text(), to = new_name, "renaming declaration");
    let green = old.replace_with(new.green().to_owned());
    Ok(SyntaxNode::new_root(green))
}

fn identifier_token(name: &str) -> Option<crate::parser::SyntaxToken> {
    let parse = parse(&format!("{name} = nil"));
    if !parse.is_valid() {
        return None;
    }

    let block = parse.tree().block()?;
    let mut statements = block.statements();
    let Some(Stmt::Assignment(assignment)) = statements.next() else {
        return None;
    };
    if statements.next().is_some() {
        return None;
    }

    let list = assignment.targets()?;
    let mut targets = list.variables();
    let Some(Expr::NameRef(name_ref)) = targets.next()?.expr() else {
        return None;
    };
    if targets.next().is_some() {
        return None;
    }

    name_ref.ident().filter(|ident| ident.text() == name)
}
