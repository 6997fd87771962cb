//! Log sanitization for clinical values and secrets.
//!
//! Form values are health data. They should never reach a log line, but a
//! formatted error or a debug dump of a request body can carry them anyway.
//! Everything the log writer emits passes through [`sanitize`], which
//! redacts:
//! - any input field key followed by a number (`"glucose": 130`)
//! - email addresses
//! - JWTs and `Bearer` tokens
//! - `key=value` style secrets
//!
//! Input larger than `MEDIPREDICT_SANITIZE_MAX_BYTES` (default 16 KiB) is
//! truncated before scanning.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::{fields_for, Disease};

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;
const MAX_BYTES_ENV: &str = "MEDIPREDICT_SANITIZE_MAX_BYTES";

struct Rule {
    regex: Regex,
    replacement: String,
}

struct Rules {
    any: RegexSet,
    rules: Vec<Rule>,
}

static RULES: OnceLock<Rules> = OnceLock::new();

fn max_sanitize_bytes() -> usize {
    std::env::var(MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Pattern matching `<field key>: <number>` for every known input field.
fn feature_value_pattern() -> String {
    let keys: BTreeSet<&str> = Disease::ALL
        .iter()
        .flat_map(|d| fields_for(*d).iter().map(|f| f.key))
        .collect();
    let alternation: Vec<String> = keys.iter().map(|k| regex::escape(k)).collect();

    format!(
        r#"("?\b(?:{})\b"?\s*[:=]\s*)-?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?"#,
        alternation.join("|")
    )
}

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        let specs: Vec<(String, &str)> = vec![
            (feature_value_pattern(), "${1}[REDACTED]"),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b".to_string(),
                "[REDACTED-EMAIL]",
            ),
            (
                r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b".to_string(),
                "[REDACTED-JWT]",
            ),
            (
                r"(?i)\bbearer\s+[a-z0-9._~+/-]{16,}=*".to_string(),
                "Bearer [REDACTED-TOKEN]",
            ),
            (
                r"(?i)\b(?:api[_-]?key|access[_-]?token|secret|password|token)\b\s*[:=]\s*[A-Za-z0-9+/_-]{16,}={0,2}".to_string(),
                "[REDACTED-SECRET]",
            ),
        ];

        // Patterns are fixed at compile time apart from the field keys,
        // which are escaped.
        let any = RegexSet::new(specs.iter().map(|(p, _)| p.as_str()))
            .expect("Valid regex set");
        let rules = specs
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement: replacement.to_string(),
            })
            .collect();

        Rules { any, rules }
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact clinical values and secrets from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = if rules.any.is_match(prefix) {
        let mut text = prefix.to_string();
        for idx in rules.any.matches(prefix).into_iter() {
            let rule = &rules.rules[idx];
            text = rule
                .regex
                .replace_all(&text, rule.replacement.as_str())
                .into_owned();
        }
        text
    } else {
        prefix.to_string()
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether a string contains anything [`sanitize`] would redact.
#[must_use]
pub fn contains_sensitive(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    rules().any.is_match(prefix)
}

/// `MakeWriter` wrapper that sanitizes each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer; complete lines are sanitized and forwarded.
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let clean = sanitize(&String::from_utf8_lossy(bytes));
        self.inner.write_all(clean.as_bytes())
    }

    fn emit_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A single oversized line is flushed as-is (sanitize truncates it).
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let all = std::mem::take(&mut self.pending);
            self.emit(&all)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.emit_complete_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.emit_complete_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}
