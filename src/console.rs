//! Operator-facing console output
//!
//! Every line is prefixed with a local wall-clock timestamp and wrapped in the
//! ANSI codes of its [`Tone`]. Diagnostics that operators do not need go
//! through `tracing` instead.

use std::io::Write;

use chrono::Local;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Width of a full-width rule line
pub const RULE_WIDTH: usize = 70;

/// Severity / styling of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Bold,
    Heading,
    Info,
    Success,
    Warning,
    Failure,
    Banner,
}

impl Tone {
    fn codes(self) -> &'static [&'static str] {
        match self {
            Tone::Plain => &[],
            Tone::Bold => &[BOLD],
            Tone::Heading => &[BOLD, BLUE],
            Tone::Info => &[BLUE],
            Tone::Success => &[GREEN],
            Tone::Warning => &[YELLOW],
            Tone::Failure => &[RED],
            Tone::Banner => &[GREEN, BOLD],
        }
    }
}

/// Timestamped line writer
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl Console<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Write one timestamped line
    pub fn line(&mut self, tone: Tone, msg: impl AsRef<str>) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let result = if self.color {
            writeln!(
                self.out,
                "{}[{}] {}{}",
                tone.codes().concat(),
                timestamp,
                msg.as_ref(),
                RESET
            )
        } else {
            writeln!(self.out, "[{}] {}", timestamp, msg.as_ref())
        };

        if let Err(e) = result.and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write console line");
        }
    }

    /// Write an empty line, used to separate sections
    pub fn blank(&mut self) {
        if let Err(e) = writeln!(self.out) {
            tracing::warn!(error = %e, "failed to write console line");
        }
    }

    /// A full-width rule made of `ch`
    pub fn rule(&mut self, ch: char) {
        let rule: String = std::iter::repeat(ch).take(RULE_WIDTH).collect();
        self.line(Tone::Bold, rule);
    }

    /// Rule / title / rule block
    pub fn section(&mut self, ch: char, title: &str, tone: Tone) {
        self.rule(ch);
        self.line(tone, title);
        self.rule(ch);
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
