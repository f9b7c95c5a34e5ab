//! User format strings for the Waybar text and tooltip.
//!
//! Three constructs are recognized, resolved in this order:
//!
//! - `{?a&b}content{/}` shows `content` only when every listed field is
//!   set (see [`FieldValue::is_set`]).
//! - `{?a}content{/a}` does the same for one field.
//! - `{name}` is replaced by the field value.
//!
//! Conditionals do not nest and there is no way to escape a literal brace.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::eta::NOT_STARTED;

/// Value of one template field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
}

impl FieldValue {
    /// True for non-empty text other than "Not started" and for non-zero
    /// integers.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty() && s != NOT_STARTED,
            Self::Int(n) => *n != 0,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Named fields available to a template.
pub type Fields = BTreeMap<String, FieldValue>;

/// A template that references something the data does not provide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown field {{{0}}} in format string")]
    UnknownField(String),
    #[error("unterminated placeholder at byte {0} in format string")]
    Unterminated(usize),
}

static MULTI_CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\?([^}]+&[^}]+)\}(.*?)\{/\}").expect("valid multi-conditional pattern")
});

/// Expands `template` against `data`.
pub fn format_output(template: &str, data: &Fields) -> Result<String, TemplateError> {
    let pass = expand_multi_conditionals(template, data)?;
    let pass = expand_single_conditionals(&pass, data)?;
    substitute(&pass, data)
}

fn is_set(data: &Fields, name: &str) -> bool {
    data.get(name).is_some_and(FieldValue::is_set)
}

/// Resolves every `{?a&b&...}content{/}` block.
fn expand_multi_conditionals(template: &str, data: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in MULTI_CONDITIONAL.captures_iter(template) {
        let (Some(whole), Some(names), Some(content)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        if names.as_str().split('&').all(|n| is_set(data, n.trim())) {
            out.push_str(&substitute(content.as_str(), data)?);
        }
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Resolves every `{?name}content{/name}` block, scanning left to right.
///
/// The closing tag must repeat the name and sit on the same line.
fn expand_single_conditionals(template: &str, data: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{?") {
        let Some((name, content, consumed)) = single_block(&rest[open..]) else {
            // Not a block: keep the `{` and look again after it.
            out.push_str(&rest[..open + 1]);
            rest = &rest[open + 1..];
            continue;
        };
        out.push_str(&rest[..open]);
        if is_set(data, name) {
            out.push_str(&substitute(content, data)?);
        }
        rest = &rest[open + consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Matches `{?name}content{/name}` at the start of `s`. Returns the name,
/// the content and the number of bytes consumed.
fn single_block(s: &str) -> Option<(&str, &str, usize)> {
    let after_open = s.strip_prefix("{?")?;
    let name_len = after_open
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_open.len());
    if name_len == 0 {
        return None;
    }
    let name = &after_open[..name_len];
    let body = after_open[name_len..].strip_prefix('}')?;
    let close = format!("{{/{name}}}");
    let end = body.find(&close)?;
    let content = &body[..end];
    if content.contains('\n') {
        return None;
    }
    let consumed = 2 + name_len + 1 + end + close.len();
    Some((name, content, consumed))
}

/// Replaces every `{name}` with its value.
fn substitute(template: &str, data: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let Some(len) = rest[open + 1..].find('}') else {
            return Err(TemplateError::Unterminated(offset + open));
        };
        let name = &rest[open + 1..open + 1 + len];
        let value = data
            .get(name)
            .ok_or_else(|| TemplateError::UnknownField(name.to_string()))?;
        out.push_str(&value.to_string());
        let consumed = open + len + 2;
        rest = &rest[consumed..];
        offset += consumed;
    }
    out.push_str(rest);
    Ok(out)
}
