//! Parse event observation
//!
//! The parser reports each construct it recognizes as a [`ParseEvent`] to
//! an optional [`ParseObserver`]. Tracing is therefore a caller concern:
//! the parser itself never prints, and with no observer attached a parse
//! has no side effects at all.
//!
//! [`ParseTrace`] is the bundled observer. It renders each event as one
//! line of the classic parse transcript:
//!
//! ```text
//! Declaration: a
//! Assignment: a =
//! Expression: 5
//! If Statement:
//! ```

use std::fmt;

use super::ast::CompareOp;

/// One parser recognition step.
///
/// Events fire in source order as constructs are recognized. A parse that
/// fails partway through will have reported the events leading up to the
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A declaration bound `name`.
    Declaration { name: String },
    /// An assignment to `target` was recognized; the value's operand
    /// events follow.
    Assignment { target: String },
    /// A conditional statement begins; its condition events follow.
    ConditionalEnter,
    /// The else branch of the current conditional begins.
    ElseEnter,
    /// A return statement with the given (unquoted) string value.
    Return { value: String },
    /// An identifier or number operand inside an expression.
    Operand { text: String },
    /// The comparison operator between two operands.
    Comparison { op: CompareOp },
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEvent::Declaration { name } => write!(f, "Declaration: {}", name),
            ParseEvent::Assignment { target } => write!(f, "Assignment: {} =", target),
            ParseEvent::ConditionalEnter => write!(f, "If Statement:"),
            ParseEvent::ElseEnter => write!(f, "Else Block:"),
            ParseEvent::Return { value } => write!(f, "Return Statement: {}", value),
            ParseEvent::Operand { text } => write!(f, "Expression: {}", text),
            ParseEvent::Comparison { op } => write!(f, "Operator: {}", op),
        }
    }
}

/// Receiver for parse events.
pub trait ParseObserver {
    fn on_event(&mut self, event: ParseEvent);
}

/// Observer that records events as transcript lines.
#[derive(Debug, Default)]
pub struct ParseTrace {
    lines: Vec<String>,
}

impl ParseTrace {
    pub fn new() -> Self {
        ParseTrace::default()
    }

    /// The recorded lines, in event order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ParseObserver for ParseTrace {
    fn on_event(&mut self, event: ParseEvent) {
        self.lines.push(event.to_string());
    }
}
