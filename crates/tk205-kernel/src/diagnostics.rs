//! The diagnostic channel.
//!
//! Binding is permissive: a missing or malformed field never aborts loading.
//! Instead a [`Diagnostic`] is reported to a [`DiagnosticSink`], which decides
//! whether the message is merely observed or escalated into a fatal error.
//!
//! There is no process-wide handler. A sink is owned by whoever drives the
//! binding (normally the loader) and borrowed by every
//! [`BindingContext`](crate::BindingContext) it creates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic, ordered `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

/// One message raised while binding or validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted field path the message concerns (empty for the document root).
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{}: {}: {}", self.severity, self.path, self.message)
        }
    }
}

/// What the binder should do after a sink has seen a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep binding with defaults.
    Continue,
    /// Keep binding, but fail the enclosing load with this diagnostic.
    Escalate,
}

impl Disposition {
    /// `Escalate` when `severity` reaches `threshold`.
    pub fn at_threshold(severity: Severity, threshold: Option<Severity>) -> Self {
        match threshold {
            Some(min) if severity >= min => Self::Escalate,
            _ => Self::Continue,
        }
    }
}

/// Receiver for diagnostics.
///
/// Any `Fn(&Diagnostic) -> Disposition` closure is a sink.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic) -> Disposition;
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) -> Disposition + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) -> Disposition {
        self(diagnostic)
    }
}

/// Default sink: forwards every diagnostic to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    escalate_at: Option<Severity>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escalate diagnostics at or above `severity`.
    pub fn escalating_at(severity: Severity) -> Self {
        Self {
            escalate_at: Some(severity),
        }
    }

    pub fn with_threshold(escalate_at: Option<Severity>) -> Self {
        Self { escalate_at }
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) -> Disposition {
        let path = diagnostic.path.as_str();
        let message = diagnostic.message.as_str();
        match diagnostic.severity {
            Severity::Debug => tracing::debug!(path, "{message}"),
            Severity::Info => tracing::info!(path, "{message}"),
            Severity::Warn => tracing::warn!(path, "{message}"),
            Severity::Error => tracing::error!(path, "{message}"),
        }
        Disposition::at_threshold(diagnostic.severity, self.escalate_at)
    }
}

/// Sink that records every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    escalate_at: Option<Severity>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escalating_at(severity: Severity) -> Self {
        Self {
            diagnostics: Mutex::default(),
            escalate_at: Some(severity),
        }
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Diagnostics at or above `severity`.
    pub fn at_least(&self, severity: Severity) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity >= severity)
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) -> Disposition {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
        Disposition::at_threshold(diagnostic.severity, self.escalate_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn severity_parse() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("err".parse::<Severity>().unwrap(), Severity::Error);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn diagnostic_display_includes_path() {
        let d = Diagnostic::new(Severity::Warn, "RS_instance.metadata", "missing field");
        insta::assert_snapshot!(d.to_string(), @"WARN: RS_instance.metadata: missing field");
        let root = Diagnostic::new(Severity::Error, "", "bad document");
        insta::assert_snapshot!(root.to_string(), @"ERROR: bad document");
    }

    #[test]
    fn threshold_escalation() {
        assert_eq!(
            Disposition::at_threshold(Severity::Warn, Some(Severity::Warn)),
            Disposition::Escalate
        );
        assert_eq!(
            Disposition::at_threshold(Severity::Info, Some(Severity::Warn)),
            Disposition::Continue
        );
        assert_eq!(
            Disposition::at_threshold(Severity::Error, None),
            Disposition::Continue
        );
    }

    #[test]
    fn closures_are_sinks() {
        let sink = |d: &Diagnostic| {
            if d.severity == Severity::Error {
                Disposition::Escalate
            } else {
                Disposition::Continue
            }
        };
        let error = Diagnostic::new(Severity::Error, "x", "boom");
        assert_eq!(sink.report(&error), Disposition::Escalate);
    }

    #[test]
    fn collecting_sink_records_in_order() {
        let sink = CollectingSink::escalating_at(Severity::Error);
        assert_eq!(
            sink.report(&Diagnostic::new(Severity::Warn, "a", "first")),
            Disposition::Continue
        );
        assert_eq!(
            sink.report(&Diagnostic::new(Severity::Error, "b", "second")),
            Disposition::Escalate
        );
        let seen = sink.diagnostics();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].path, "a");
        assert_eq!(sink.at_least(Severity::Error).len(), 1);
    }
}
