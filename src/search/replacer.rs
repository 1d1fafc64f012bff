//! Single-match literal replace and whole-document pattern replace

use regex::RegexBuilder;

use super::locator::locate;
use crate::error::EditorError;
use crate::model::Document;

fn require_query(query: &str) -> Result<(), EditorError> {
    if query.trim().is_empty() {
        return Err(EditorError::InvalidArgument("empty find query"));
    }
    Ok(())
}

/// Replace the next occurrence of `find` at or after `from` (wrapping once)
/// with the literal text `replace_with`.
///
/// Returns the cursor position after the inserted text, or `Ok(None)` when
/// the document holds no occurrence. An empty query is rejected before the
/// document is touched.
pub fn replace_one(
    find: &str,
    replace_with: &str,
    document: &mut Document,
    from: usize,
    case_sensitive: bool,
) -> Result<Option<usize>, EditorError> {
    require_query(find)?;
    let Some(found) = locate(find, document.buffer(), from, case_sensitive) else {
        return Ok(None);
    };
    let cursor = document.replace_range(found, replace_with);
    Ok(Some(cursor))
}

/// Rewrite a backslash-style replacement template into `regex` expansion
/// syntax.
///
/// `\1`..`\99` and `\g<name>` refer to groups, `\n`, `\t`, `\r` and `\\`
/// are escapes, and `$` is an ordinary character. Any other backslash is
/// kept as written.
pub fn expand_template(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d @ '1'..='9') => {
                    chars.next();
                    let mut group = d.to_string();
                    if let Some(&next) = chars.peek().filter(|c| c.is_ascii_digit()) {
                        chars.next();
                        group.push(next);
                    }
                    out.push_str(&format!("${{{}}}", group));
                }
                Some('g') => {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    let mut name = None;
                    if lookahead.next() == Some('<') {
                        let mut acc = String::new();
                        for c in lookahead.by_ref() {
                            if c == '>' {
                                name = Some(acc);
                                break;
                            }
                            acc.push(c);
                        }
                    }
                    match name {
                        Some(name) if !name.is_empty() => {
                            out.push_str(&format!("${{{}}}", name));
                            chars = lookahead;
                        }
                        _ => out.push('\\'),
                    }
                }
                Some('n') => {
                    chars.next();
                    out.push('\n');
                }
                Some('t') => {
                    chars.next();
                    out.push('\t');
                }
                Some('r') => {
                    chars.next();
                    out.push('\r');
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

/// Replace every match of the regular expression `pattern` with the
/// substitution template `template` (`\1`, `\g<name>`, see
/// [`expand_template`]), as one edit.
///
/// Matching is case-insensitive unless `case_sensitive` is set. Returns the
/// number of replacements; zero means nothing matched and the document is
/// unchanged.
pub fn replace_all(
    pattern: &str,
    template: &str,
    document: &mut Document,
    case_sensitive: bool,
) -> Result<usize, EditorError> {
    require_query(pattern)?;
    let re = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()?;

    let text = document.text();
    let count = re.find_iter(&text).count();
    if count == 0 {
        return Ok(0);
    }

    let replaced = re.replace_all(&text, expand_template(template).as_str());
    document.replace_all_text(&replaced);
    tracing::debug!("Replaced {} matches of /{}/", count, pattern);
    Ok(count)
}
