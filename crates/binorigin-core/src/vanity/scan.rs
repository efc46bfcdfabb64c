//! Line scanner for `go-import` meta directives.
//!
//! Example directive:
//! `<meta name="go-import" content="fyne.io/fyne git https://github.com/fyne-io/fyne">`

use once_cell::sync::Lazy;
use regex::Regex;

/// Captures the redirect URL out of a `go-import` meta tag.
static GO_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"< *meta name="go-import" content=".+ \w+ (https?://[^"]+)" */?>"#)
        .expect("go-import regex should compile")
});

/// Outcome of scanning one line of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// Nothing decisive on this line; keep reading.
    Continue,
    /// Found a directive; holds the captured redirect URL.
    Found(String),
    /// Reached `</head>` without a match. The directive is only valid inside
    /// the head, so nothing past this point can match.
    EndOfHead,
}

/// Scans a single line for a `go-import` directive or the end-of-head marker.
pub fn scan_line(line: &str) -> ScanStep {
    if let Some(caps) = GO_IMPORT_RE.captures(line) {
        return ScanStep::Found(caps[1].to_string());
    }
    if line.contains("</head>") {
        return ScanStep::EndOfHead;
    }
    ScanStep::Continue
}

/// Accumulates body bytes from the transfer callback and scans each completed
/// line, so the document is never buffered whole.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Feeds one chunk of body bytes. Returns the first decisive step, or
    /// `Continue` when the chunk ended mid-line without one.
    pub fn feed(&mut self, chunk: &[u8]) -> ScanStep {
        self.pending.extend_from_slice(chunk);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            match scan_line(line.trim_end()) {
                ScanStep::Continue => continue,
                step => return step,
            }
        }
        ScanStep::Continue
    }

    /// Scans whatever is left after the final newline, once the body ends.
    pub fn finish(&mut self) -> ScanStep {
        if self.pending.is_empty() {
            return ScanStep::Continue;
        }
        let line = std::mem::take(&mut self.pending);
        scan_line(String::from_utf8_lossy(&line).trim_end())
    }
}
