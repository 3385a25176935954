//! # Input Sanitization
//!
//! Free text is stripped of markup before any grammar check runs. The
//! sanitizer is an injected capability so callers (and tests) can swap
//! the policy without touching the validators.

use std::sync::OnceLock;

use regex::Regex;

/// Strips unsafe content from a raw input string
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}

/// Removes HTML markup and escapes whatever angle brackets or entities
/// survive.
///
/// - `<script>` and `<style>` elements are dropped with their content
/// - every other tag is removed, its text kept
/// - `& < > " '` in the remaining text are entity-escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupSanitizer;

impl MarkupSanitizer {
    pub fn new() -> Self {
        Self
    }
}

fn executable_blocks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("executable block pattern is valid")
    })
}

fn tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"))
}

impl Sanitizer for MarkupSanitizer {
    fn sanitize(&self, input: &str) -> String {
        let without_blocks = executable_blocks().replace_all(input, "");
        let text = tags().replace_all(&without_blocks, "");

        let mut output = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => output.push_str("&amp;"),
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                '"' => output.push_str("&#34;"),
                '\'' => output.push_str("&#39;"),
                c => output.push(c),
            }
        }
        output
    }
}
