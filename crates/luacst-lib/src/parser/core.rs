//! Parser state machine and low-level operations.
//!
//! The grammar never touches the green tree directly. It records a flat list of
//! [`Event`]s through [`Marker`]s; [`build_tree`] replays them into Rowan once
//! parsing is done, inserting trivia between significant tokens.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet, token_sets};
use super::invariants::assert_lossless;
use super::lexer::{Token, is_terminated_comment, is_terminated_string, token_text};
use super::BareExpressionPolicy;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub(super) const DEFAULT_RECURSION_LIMIT: u32 = 128;
const DEBUG_FUEL: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Event {
    /// `forward_parent` is the distance to the `Start` of a node that wraps this one,
    /// recorded by [`CompletedMarker::precede`].
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    /// Index into the raw token vector.
    Token { index: usize },
    Finish,
}

impl Event {
    fn tombstone() -> Self {
        Event::Start {
            kind: SyntaxKind::Tombstone,
            forward_parent: None,
        }
    }
}

/// Everything a rollback has to restore.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    events: usize,
    pos: usize,
    diagnostics: usize,
    last_diagnostic_pos: Option<TextSize>,
    recursion_limit_hit: bool,
}

/// Open node. Must be completed, abandoned, or rolled back.
#[must_use = "marker must be completed, abandoned, or rolled back"]
#[derive(Debug)]
pub(crate) struct Marker {
    event: usize,
    snapshot: Snapshot,
}

/// Closed node, can still be wrapped by a parent via [`CompletedMarker::precede`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker {
    event: usize,
    kind: SyntaxKind,
    snapshot: Snapshot,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    /// Raw index into `tokens`; may sit on trivia or invalid characters.
    pub(super) pos: usize,
    pub(super) events: Vec<Event>,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    pub(super) bare_expressions: BareExpressionPolicy,
    recursion_limit: Option<u32>,
    recursion_limit_hit: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            events: Vec::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            debug_fuel: std::cell::Cell::new(DEBUG_FUEL),
            bare_expressions: BareExpressionPolicy::default(),
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
            recursion_limit_hit: false,
        }
    }

    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_bare_expressions(mut self, policy: BareExpressionPolicy) -> Self {
        self.bare_expressions = policy;
        self
    }

    pub fn parse(mut self) -> (GreenNode, Diagnostics) {
        self.report_unfinished_comments();
        self.parse_chunk();
        let green = build_tree(self.source, &self.tokens, self.events);
        assert_lossless(&green, self.source);
        (green, self.diagnostics)
    }

    fn report_unfinished_comments(&mut self) {
        for token in &self.tokens {
            if !is_terminated_comment(token.kind, token_text(self.source, token)) {
                self.diagnostics
                    .report(DiagnosticKind::UnfinishedComment, token.span)
                    .emit();
            }
        }
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    /// Raw index of the `n`-th significant token at or after the cursor.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia() && t.kind != SyntaxKind::InvalidChar)
            .nth(n)
            .map(|(i, _)| self.pos + i)
    }

    /// Current token kind, skipping trivia and invalid characters.
    /// Returns `Error` at EOF (acts as sentinel).
    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.nth_index(lookahead)
            .map_or(SyntaxKind::Error, |i| self.tokens[i].kind)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.nth_index(0)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |i| self.tokens[i].span)
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&self) -> bool {
        self.current() == SyntaxKind::Error
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn start(&mut self) -> Marker {
        let snapshot = self.snapshot();
        self.events.push(Event::tombstone());
        Marker {
            event: snapshot.events,
            snapshot,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            events: self.events.len(),
            pos: self.pos,
            diagnostics: self.diagnostics.len(),
            last_diagnostic_pos: self.last_diagnostic_pos,
            recursion_limit_hit: self.recursion_limit_hit,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.events.truncate(snapshot.events);
        self.pos = snapshot.pos;
        self.diagnostics.truncate(snapshot.diagnostics);
        self.last_diagnostic_pos = snapshot.last_diagnostic_pos;
        self.recursion_limit_hit = snapshot.recursion_limit_hit;
        self.reset_debug_fuel();
    }

    /// Consumes the current token, then wraps any invalid characters that follow it.
    pub(super) fn bump(&mut self) {
        self.wrap_invalid_chars();
        let Some(index) = self.nth_index(0) else {
            panic!("bump called at EOF");
        };
        self.reset_debug_fuel();

        let token = self.tokens[index];
        self.events.push(Event::Token { index });
        self.pos = index + 1;

        if token_sets::STRINGS.contains(token.kind)
            && !is_terminated_string(token.kind, token_text(self.source, &token))
            && self.should_report(token.span.start())
        {
            self.diagnostics
                .report(DiagnosticKind::UnfinishedString, token.span)
                .emit();
        }

        self.wrap_invalid_chars();
    }

    /// Wraps each invalid character between the cursor and the next significant
    /// token in its own `Error` node.
    pub(super) fn wrap_invalid_chars(&mut self) {
        while let Some(offset) = self.tokens[self.pos..]
            .iter()
            .position(|t| !t.kind.is_trivia())
        {
            let index = self.pos + offset;
            if self.tokens[index].kind != SyntaxKind::InvalidChar {
                break;
            }
            let m = self.start();
            self.events.push(Event::Token { index });
            self.pos = index + 1;
            m.error(self, DiagnosticKind::UnexpectedCharacter, None);
        }
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit "'x' expected" but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        let what = match kind.spelling() {
            Some(text) => format!("'{text}'"),
            None => "name".to_string(),
        };
        self.error_msg(DiagnosticKind::ExpectedToken, what);
        false
    }

    /// One diagnostic per offset; nothing after the recursion limit gave up on the input.
    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.recursion_limit_hit || self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    /// Missing closer, pointing back at the construct that needed it.
    pub(super) fn expect_closing(
        &mut self,
        kind: SyntaxKind,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return false;
        }
        let what = kind.spelling().unwrap_or("token");
        self.diagnostics
            .report(DiagnosticKind::ExpectedToken, range)
            .message(format!("'{what}'"))
            .related_to(related_msg, open_range)
            .emit();
        false
    }

    /// Range of significant tokens consumed since `pos`, empty at the cursor if none.
    pub(super) fn range_since(&self, pos: usize) -> TextRange {
        let consumed = &self.tokens[pos..self.pos];
        let first = consumed.iter().find(|t| !t.kind.is_trivia());
        let last = consumed.iter().rev().find(|t| !t.kind.is_trivia());
        match (first, last) {
            (Some(first), Some(last)) => TextRange::new(first.span.start(), last.span.end()),
            _ => TextRange::empty(self.current_span().start()),
        }
    }

    /// Returns false when nesting is too deep; the rest of the input has then been
    /// swallowed into one `Error` node and the caller must unwind.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_limit
            && self.depth >= limit
        {
            self.bail_out(limit);
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    fn bail_out(&mut self, limit: u32) {
        if self.recursion_limit_hit {
            return;
        }
        self.recursion_limit_hit = true;
        tracing::warn!(limit, offset = u32::from(self.current_span().start()), "recursion limit exceeded");

        let range = TextRange::new(self.current_span().start(), self.eof_offset());
        self.diagnostics
            .report(DiagnosticKind::RecursionLimitExceeded, range)
            .message(limit.to_string())
            .emit();
        self.last_diagnostic_pos = Some(range.start());

        self.events.push(Event::Start {
            kind: SyntaxKind::Error,
            forward_parent: None,
        });
        for index in self.pos..self.tokens.len() {
            if !self.tokens[index].kind.is_trivia() {
                self.events.push(Event::Token { index });
            }
        }
        self.events.push(Event::Finish);
        self.pos = self.tokens.len();
    }
}

impl Marker {
    pub(super) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        match &mut p.events[self.event] {
            Event::Start { kind: slot, .. } => *slot = kind,
            _ => unreachable!("marker must point at a Start event"),
        }
        p.events.push(Event::Finish);
        CompletedMarker {
            event: self.event,
            kind,
            snapshot: self.snapshot,
        }
    }

    /// Drops the node but keeps everything parsed inside it.
    pub(super) fn abandon(self, p: &mut Parser<'_>) {
        if self.event == p.events.len() - 1 {
            p.events.pop();
        }
    }

    /// Discards the node and everything parsed since it was started.
    pub(super) fn rollback(self, p: &mut Parser<'_>) {
        p.restore(self.snapshot);
    }

    /// Closes the node as `Error` with a diagnostic spanning its tokens.
    pub(super) fn error(
        self,
        p: &mut Parser<'_>,
        kind: DiagnosticKind,
        message: Option<&str>,
    ) -> CompletedMarker {
        let range = p.range_since(self.snapshot.pos);
        if p.should_report(range.start()) {
            let builder = p.diagnostics.report(kind, range);
            match message {
                Some(msg) => builder.message(msg).emit(),
                None => builder.emit(),
            }
        }
        self.complete(p, SyntaxKind::Error)
    }
}

impl CompletedMarker {
    /// Opens a new node that will become the parent of this one.
    pub(super) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new = p.start();
        match &mut p.events[self.event] {
            Event::Start { forward_parent, .. } => *forward_parent = Some(new.event - self.event),
            _ => unreachable!("completed marker must point at a Start event"),
        }
        Marker {
            event: new.event,
            snapshot: self.snapshot,
        }
    }

    pub(super) fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub(super) fn range(&self, p: &Parser<'_>) -> TextRange {
        p.range_since(self.snapshot.pos)
    }
}

/// Replays events into a green tree. Trivia before a node's first token goes to the
/// parent; trivia left at the end goes to the root.
pub(super) fn build_tree(source: &str, tokens: &[Token], mut events: Vec<Event>) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    let mut cursor = 0;
    let mut depth = 0usize;
    let mut parents = Vec::new();

    let emit = |builder: &mut GreenNodeBuilder<'_>, token: &Token| {
        builder.token(token.kind.into(), token_text(source, token));
    };

    for i in 0..events.len() {
        match std::mem::replace(&mut events[i], Event::tombstone()) {
            Event::Start {
                kind: SyntaxKind::Tombstone,
                ..
            } => {}
            Event::Start {
                kind,
                forward_parent,
            } => {
                parents.push(kind);
                let mut at = i;
                let mut next = forward_parent;
                while let Some(distance) = next {
                    at += distance;
                    next = match std::mem::replace(&mut events[at], Event::tombstone()) {
                        Event::Start {
                            kind,
                            forward_parent,
                        } => {
                            if kind != SyntaxKind::Tombstone {
                                parents.push(kind);
                            }
                            forward_parent
                        }
                        _ => unreachable!("forward parent must be a Start event"),
                    };
                }

                if depth > 0 {
                    while cursor < tokens.len() && tokens[cursor].kind.is_trivia() {
                        emit(&mut builder, &tokens[cursor]);
                        cursor += 1;
                    }
                }
                for kind in parents.drain(..).rev() {
                    builder.start_node(kind.into());
                    depth += 1;
                }
            }
            Event::Token { index } => {
                while cursor <= index {
                    emit(&mut builder, &tokens[cursor]);
                    cursor += 1;
                }
            }
            Event::Finish => {
                depth -= 1;
                if depth == 0 {
                    while cursor < tokens.len() {
                        emit(&mut builder, &tokens[cursor]);
                        cursor += 1;
                    }
                }
                builder.finish_node();
            }
        }
    }

    builder.finish()
}
