//! Line scanning of `mvn help:all-profiles` output
//!
//! Two grammars are recognized, one line at a time:
//!
//! - `Profile Id: <id> (Active: <anything>, Source: pom)` announces a profile
//! - `[echoproperties] <key>=<value>` echoes a build property
//!
//! Lines matching neither are ignored. The grammars sit behind [`LineGrammar`]
//! so they can be replaced without touching classification.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Recognizes the two line shapes emitted by the inquiry build
pub trait LineGrammar: Send + Sync {
    /// Profile identifier announced by this line, if any
    fn profile<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// `(key, value)` echoed by this line, if any
    fn property<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)>;
}

/// The grammars of Maven's help plugin and the `echoproperties` goal
#[derive(Debug, Default, Clone, Copy)]
pub struct MavenLineGrammar;

fn profile_regex() -> &'static Regex {
    static PROFILE_REGEX: OnceLock<Regex> = OnceLock::new();
    PROFILE_REGEX.get_or_init(|| {
        Regex::new(r"Profile Id: ([a-zA-Z0-9_.-]+) \(Active: .*, Source: pom\)")
            .expect("Invalid profile regex")
    })
}

fn property_regex() -> &'static Regex {
    static PROPERTY_REGEX: OnceLock<Regex> = OnceLock::new();
    PROPERTY_REGEX.get_or_init(|| {
        Regex::new(r"^\[echoproperties\] ([a-zA-Z0-9_.-]+)=(.+)$")
            .expect("Invalid property regex")
    })
}

impl LineGrammar for MavenLineGrammar {
    fn profile<'a>(&self, line: &'a str) -> Option<&'a str> {
        profile_regex()
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    fn property<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = property_regex().captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// Everything scraped from one inquiry run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub properties: HashMap<String, String>,
    pub profiles: BTreeSet<String>,
}

impl ScanResult {
    /// Property value, or the empty string when it was never echoed
    pub fn property(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A line recognized while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannedLine<'a> {
    Profile(&'a str),
    Property(&'a str, &'a str),
}

/// Classify one line; the profile grammar wins when both would match
pub fn scan_line<'a>(grammar: &dyn LineGrammar, line: &'a str) -> Option<ScannedLine<'a>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if let Some(id) = grammar.profile(line) {
        return Some(ScannedLine::Profile(id));
    }
    grammar
        .property(line)
        .map(|(key, value)| ScannedLine::Property(key, value))
}

/// Scan a complete standard output capture.
///
/// `on_line` sees every recognized line in order, which lets the caller
/// report what was found without the scanner knowing about reporting.
pub fn scan_output<F>(grammar: &dyn LineGrammar, stdout: &str, mut on_line: F) -> ScanResult
where
    F: FnMut(ScannedLine<'_>),
{
    let mut result = ScanResult::default();

    // str::split keeps a trailing partial line; only the empty tail after a final '\n' is skipped
    let mut lines = stdout.split('\n').peekable();
    while let Some(line) = lines.next() {
        if line.is_empty() && lines.peek().is_none() {
            break;
        }
        match scan_line(grammar, line) {
            Some(scanned @ ScannedLine::Profile(id)) => {
                result.profiles.insert(id.to_string());
                on_line(scanned);
            }
            Some(scanned @ ScannedLine::Property(key, value)) => {
                result.properties.insert(key.to_string(), value.to_string());
                on_line(scanned);
            }
            None => {}
        }
    }

    result
}
