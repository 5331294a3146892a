//! Markup stripping for user-supplied free text.
//!
//! Titles and descriptions are stored as received and cleaned on the way
//! out. A short allow-list of formatting tags survives (with a reduced
//! attribute set); every other tag is escaped so that it renders as text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^<>])*)>").expect("valid regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
    .expect("valid regex")
});

static CHAR_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));?|&([A-Za-z]+);").expect("valid regex")
});

/// Named references that can spell out a scheme separator or the
/// whitespace a browser ignores inside one.
const NAMED_REFS: &[(&str, char)] = &[
    ("colon", ':'),
    ("Tab", '\t'),
    ("NewLine", '\n'),
    ("nbsp", '\u{a0}'),
    ("amp", '&'),
    ("lpar", '('),
    ("rpar", ')'),
];

/// Tags kept in output, with the attributes each may carry.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target"]),
    ("b", &[]),
    ("blockquote", &[]),
    ("br", &[]),
    ("code", &[]),
    ("div", &[]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("li", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("s", &[]),
    ("small", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("u", &[]),
    ("ul", &[]),
];

/// Attributes whose value is a URL and must not carry a script scheme.
const URL_ATTRS: &[&str] = &["href", "src"];
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Strip unsafe markup from `input`.
///
/// Allowed tags are rebuilt from their permitted attributes; anything else
/// that looks like markup has its angle brackets escaped.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        escape_brackets(&input[last..whole.start()], &mut out);
        match rebuild_tag(&caps) {
            Some(tag) => out.push_str(&tag),
            None => escape_brackets(whole.as_str(), &mut out),
        }
        last = whole.end();
    }
    escape_brackets(&input[last..], &mut out);

    out
}

fn escape_brackets(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn rebuild_tag(caps: &Captures<'_>) -> Option<String> {
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();
    let (_, allowed_attrs) = ALLOWED_TAGS.iter().find(|(tag, _)| *tag == name)?;

    if closing {
        return Some(format!("</{name}>"));
    }

    let raw_attrs = caps.get(3).map_or("", |m| m.as_str());
    let self_closing = raw_attrs.trim_end().ends_with('/');

    let mut tag = format!("<{name}");
    for attr in ATTR_RE.captures_iter(raw_attrs) {
        let attr_name = attr[1].to_ascii_lowercase();
        if !allowed_attrs.contains(&attr_name.as_str()) {
            continue;
        }
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map(|m| m.as_str());

        match value {
            Some(value) => {
                if URL_ATTRS.contains(&attr_name.as_str()) && has_blocked_scheme(value) {
                    continue;
                }
                tag.push_str(&format!(" {attr_name}=\"{}\"", escape_attr(value)));
            }
            None => {
                tag.push(' ');
                tag.push_str(&attr_name);
            }
        }
    }
    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');

    Some(tag)
}

/// Resolve numeric and the common named character references the way a
/// browser does when reading an attribute value.
fn decode_char_refs(value: &str) -> String {
    CHAR_REF_RE
        .replace_all(value, |caps: &Captures<'_>| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| {
                    NAMED_REFS
                        .iter()
                        .find(|(n, _)| *n == name.as_str())
                        .map(|(_, c)| *c)
                })
            };
            match decoded {
                Some(c) => c.to_string(),
                // Overlong or unknown references decode to U+FFFD or stay as-is.
                None if caps.get(3).is_some() => caps[0].to_string(),
                None => char::REPLACEMENT_CHARACTER.to_string(),
            }
        })
        .into_owned()
}

fn has_blocked_scheme(value: &str) -> bool {
    let normalized: String = decode_char_refs(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
