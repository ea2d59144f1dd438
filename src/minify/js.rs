//! JavaScript minification: comment stripping and whitespace reduction.
//!
//! This is a conservative transform, not a full compressor. Line and block
//! comments are removed, trailing whitespace is trimmed, and blank lines are
//! dropped. Identifiers are never renamed and statements are never
//! rewritten. String, template, and regex literals are copied verbatim.
//!
//! A `/` is read as the start of a regex literal only when the preceding
//! significant character cannot end an expression (the classic JSMin
//! disambiguation). A slash that looks like a regex but never closes on its
//! line is left untouched and reported as a warning rather than guessed at.

use super::{Diagnostic, FileKind, Minifier, MinifyError, MinifyOutput, Severity};

/// Minifies JavaScript by stripping comments and collapsing whitespace.
#[derive(Debug, Default)]
pub struct JsMinifier;

impl Minifier for JsMinifier {
    fn minify(&self, source: &str) -> Result<MinifyOutput, MinifyError> {
        strip(source)
    }
}

fn error_at(message: String, line: u32) -> MinifyError {
    MinifyError {
        kind: FileKind::JavaScript,
        diagnostic: Diagnostic {
            message,
            line: Some(line),
            column: None,
            severity: Severity::Error,
        },
    }
}

/// Characters after which a `/` starts a regex literal rather than division.
fn regex_can_follow(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => matches!(
            c,
            '(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';' | '+' | '-'
                | '*' | '%' | '<' | '>' | '~' | '^'
        ),
    }
}

fn count_newlines(text: &str) -> u32 {
    text.bytes().filter(|b| *b == b'\n').count() as u32
}

/// Scan a string or template literal starting at the opening quote.
/// Returns the byte index one past the closing quote.
fn scan_string(source: &str, start: usize, line: u32) -> Result<usize, MinifyError> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            // Continuation bytes of multi-byte characters never equal these
            // ASCII values, so byte-wise stepping is safe here.
            b'\\' => i += 2,
            b'\n' if quote != b'`' => {
                return Err(error_at("unterminated string literal".to_string(), line));
            }
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }

    Err(error_at("unterminated string literal".to_string(), line))
}

/// Try to scan a regex literal starting at the opening `/`. Returns the byte
/// index one past the trailing flags, or `None` when no closing `/` appears
/// on the same line (ambiguous: may have been division after all).
fn scan_regex(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    let mut in_class = false;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                // Consume trailing flags (g, i, m, s, u, y, d)
                let mut end = i + 1;
                while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
                    end += 1;
                }
                return Some(end);
            }
            b'\n' => return None,
            _ => i += 1,
        }
    }

    None
}

fn strip(source: &str) -> Result<MinifyOutput, MinifyError> {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut warnings = Vec::new();
    // Whitespace held back until we know it is not trailing
    let mut pending = String::new();
    let mut prev_significant: Option<char> = None;
    let mut line: u32 = 1;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                // Drop held-back spaces and tabs (trailing), collapse blank lines
                pending.clear();
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                line += 1;
                i += 1;
            }
            b' ' | b'\t' | b'\r' => {
                pending.push(bytes[i] as char);
                i += 1;
            }
            b'\'' | b'"' | b'`' => {
                let end = scan_string(source, i, line)?;
                out.push_str(&pending);
                pending.clear();
                out.push_str(&source[i..end]);
                line += count_newlines(&source[i..end]);
                prev_significant = Some(bytes[end - 1] as char);
                i = end;
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                // Line comment: skip to end of line, newline handled next
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                pending.clear();
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                match source[i + 2..].find("*/") {
                    Some(offset) => {
                        let end = i + 2 + offset + 2;
                        line += count_newlines(&source[i..end]);
                        // A space keeps tokens on either side apart
                        pending.push(' ');
                        i = end;
                    }
                    None => {
                        return Err(error_at("unterminated block comment".to_string(), line));
                    }
                }
            }
            b'/' if regex_can_follow(prev_significant) => match scan_regex(source, i) {
                Some(end) => {
                    out.push_str(&pending);
                    pending.clear();
                    out.push_str(&source[i..end]);
                    prev_significant = Some('/');
                    i = end;
                }
                None => {
                    warnings.push(Diagnostic {
                        message: "ambiguous `/` (regex or division), left unchanged".to_string(),
                        line: Some(line),
                        column: None,
                        severity: Severity::Warning,
                    });
                    out.push_str(&pending);
                    pending.clear();
                    out.push('/');
                    prev_significant = Some('/');
                    i += 1;
                }
            },
            _ => {
                if let Some(c) = source[i..].chars().next() {
                    out.push_str(&pending);
                    pending.clear();
                    out.push(c);
                    prev_significant = Some(c);
                    i += c.len_utf8();
                } else {
                    break;
                }
            }
        }
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    Ok(MinifyOutput {
        code: out,
        warnings,
    })
}
