//! Incremental output scanning.
//!
//! The transfer tool's console output is unstructured text that arrives in
//! arbitrary chunks. [`LineScanner`] turns chunks into complete lines plus the
//! current unterminated tail, and [`OutputMatcher`] implementations pull
//! structured facts (the transfer code, a confirmation prompt, the saved
//! path) out of that text. Swapping a matcher does not touch the I/O side.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern the transfer tool uses to tell the sender what to share.
pub const RECEIVE_CODE_PATTERN: &str = r"wormhole receive\s+(\S+)";

/// Pattern of the line reporting where a received file was written.
pub const SAVED_PATH_PATTERN: &str = r"Received file written to:?\s+(.+?)\s*$";

static RECEIVE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECEIVE_CODE_PATTERN).expect("receive code pattern is valid"));

static SAVED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SAVED_PATH_PATTERN).expect("saved path pattern is valid"));

/// Complete lines and the pending tail produced by one [`LineScanner::feed`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanBatch {
    /// Newline-terminated lines, terminator stripped.
    pub lines: Vec<String>,
    /// Text after the last newline, if any.
    pub partial: Option<String>,
}

/// Byte-oriented incremental line splitter.
///
/// Bytes are buffered until a `\n` arrives, so multi-byte characters split
/// across chunks decode correctly. Invalid UTF-8 is replaced rather than
/// treated as an error; the tool is not guaranteed to print clean text.
#[derive(Debug, Default)]
pub struct LineScanner {
    pending: Vec<u8>,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk of output.
    pub fn feed(&mut self, chunk: &[u8]) -> ScanBatch {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                lines.push(decode_line(&self.pending));
                self.pending.clear();
            } else {
                self.pending.push(byte);
            }
        }

        let partial = (!self.pending.is_empty()).then(|| decode_line(&self.pending));
        ScanBatch { lines, partial }
    }

    /// Flush the unterminated tail at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let trimmed = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(trimmed).into_owned()
}

/// Extracts one fact from a piece of output text.
pub trait OutputMatcher: Send + Sync {
    /// Return the extracted value if `text` matches.
    fn find(&self, text: &str) -> Option<String>;

    /// Check the unterminated tail of the output.
    ///
    /// The tail may still grow, so by default nothing matches there.
    fn find_partial(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Regex matcher returning the first capture group (or the whole match).
#[derive(Debug, Clone)]
pub struct CaptureMatcher {
    regex: Regex,
    /// Accept matches in the unterminated tail once whitespace follows them.
    partial: bool,
}

impl CaptureMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            partial: false,
        })
    }

    /// Matcher for the `wormhole receive <code>` hint.
    ///
    /// Also looks at partial lines: a tool that prints the hint without a
    /// newline and then waits for the receiver must still yield its code.
    pub fn receive_code() -> Self {
        Self {
            regex: RECEIVE_CODE_RE.clone(),
            partial: true,
        }
    }

    /// Matcher for the `Received file written to <path>` report.
    pub fn saved_path() -> Self {
        Self {
            regex: SAVED_PATH_RE.clone(),
            partial: false,
        }
    }

    fn capture<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        let captures = self.regex.captures(text)?;
        captures.get(1).or_else(|| captures.get(0))
    }
}

impl OutputMatcher for CaptureMatcher {
    fn find(&self, text: &str) -> Option<String> {
        self.capture(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn find_partial(&self, text: &str) -> Option<String> {
        if !self.partial {
            return None;
        }
        let found = self.capture(text)?;
        // A token running to the end of the tail may continue in the next chunk
        text[found.end()..]
            .starts_with(char::is_whitespace)
            .then(|| found.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Case-insensitive substring matcher for interactive prompts.
#[derive(Debug, Clone)]
pub struct PromptMatcher {
    needle: String,
}

impl PromptMatcher {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }
}

impl OutputMatcher for PromptMatcher {
    fn find(&self, text: &str) -> Option<String> {
        text.to_lowercase()
            .contains(&self.needle)
            .then(|| text.to_string())
    }

    fn find_partial(&self, text: &str) -> Option<String> {
        self.find(text)
    }
}
