//! Diagnostic reporting
//!
//! Broken contracts that are not raised get rendered through a
//! [`DiagnosticReporter`]. The reporter is handed to the contract manager at
//! construction; there is no process-wide printer setting.

use std::fmt;
use std::sync::{Arc, Mutex};

use colored::Colorize;

/// Visual style of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Success,
    Warning,
    Error,
}

/// Sink for human-readable diagnostics
pub trait DiagnosticReporter: Send + Sync + fmt::Debug {
    /// Emit a single line
    fn report(&self, line: &str, style: Style);
}

/// Heading level: 1 and 2 draw a rule above and below, 3 only below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    fn rule(self) -> (char, bool) {
        match self {
            HeadingLevel::One => ('=', true),
            HeadingLevel::Two => ('-', true),
            HeadingLevel::Three => ('-', false),
        }
    }
}

/// Print a heading surrounded by rule lines
pub fn print_heading(reporter: &dyn DiagnosticReporter, text: &str, level: HeadingLevel) {
    let (rule_char, rule_above) = level.rule();
    let rule: String = std::iter::repeat_n(rule_char, text.chars().count()).collect();

    if rule_above {
        reporter.report(&rule, Style::Bold);
    }
    reporter.report(text, Style::Bold);
    reporter.report(&rule, Style::Bold);
}

pub fn print_warning(reporter: &dyn DiagnosticReporter, text: &str) {
    reporter.report(text, Style::Warning);
}

pub fn print_error(reporter: &dyn DiagnosticReporter, text: &str) {
    reporter.report(text, Style::Error);
}

pub fn print_success(reporter: &dyn DiagnosticReporter, text: &str) {
    reporter.report(text, Style::Success);
}

/// Reporter that writes to stderr, optionally colored
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn styled(&self, line: &str, style: Style) -> String {
        if !self.color {
            return line.to_string();
        }
        match style {
            Style::Plain => line.to_string(),
            Style::Bold => line.bold().to_string(),
            Style::Success => line.green().bold().to_string(),
            Style::Warning => line.yellow().to_string(),
            Style::Error => line.red().bold().to_string(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DiagnosticReporter for ConsoleReporter {
    fn report(&self, line: &str, style: Style) {
        eprintln!("{}", self.styled(line, style));
    }
}

/// Reporter that keeps every line in memory
///
/// Clones share the same buffer, so a clone can be handed to a contract
/// manager while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct CapturingReporter {
    lines: Arc<Mutex<Vec<(Style, String)>>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in order
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Captured lines with the given style
    pub fn lines_with_style(&self, style: Style) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(s, _)| *s == style)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Style, String)>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticReporter for CapturingReporter {
    fn report(&self, line: &str, style: Style) {
        self.lock().push((style, line.to_string()));
    }
}
