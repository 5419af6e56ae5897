use rowan::TextRange;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Diagnostic kinds, grouped by the stage that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexical problems surfaced by the parser
    UnexpectedCharacter,
    UnfinishedString,
    UnfinishedComment,

    // User omitted something required
    ExpectedToken,
    ExpectedExpression,
    ExpectedStatement,

    // User wrote something that doesn't belong
    BareExpression,
    InvalidAssignmentTarget,

    // Input nested deeper than the configured limit
    RecursionLimitExceeded,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnfinishedString => "unfinished string",
            Self::UnfinishedComment => "unfinished long comment",

            Self::ExpectedToken => "token expected",
            Self::ExpectedExpression => "expression expected",
            Self::ExpectedStatement => "statement expected",

            Self::BareExpression => "expression is not a statement",
            Self::InvalidAssignmentTarget => "cannot assign to a function call",

            Self::RecursionLimitExceeded => "nesting too deep",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "{} expected".to_string(),
            Self::RecursionLimitExceeded => "nesting too deep: limit is {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output). Empty for "missing" diagnostics.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}

struct RangeJson(TextRange);

impl Serialize for RangeJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Range", 2)?;
        s.serialize_field("start", &u32::from(self.0.start()))?;
        s.serialize_field("end", &u32::from(self.0.end()))?;
        s.end()
    }
}

impl Serialize for RelatedInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RelatedInfo", 2)?;
        s.serialize_field("range", &RangeJson(self.range))?;
        s.serialize_field("message", &self.message)?;
        s.end()
    }
}

impl Serialize for DiagnosticMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.related.is_empty() { 3 } else { 4 };
        let mut s = serializer.serialize_struct("Diagnostic", fields)?;
        s.serialize_field("severity", &self.severity().to_string())?;
        s.serialize_field("range", &RangeJson(self.range))?;
        s.serialize_field("message", &self.message)?;
        if !self.related.is_empty() {
            s.serialize_field("related", &self.related)?;
        }
        s.end()
    }
}
