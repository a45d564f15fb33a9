//! Template mask engine.
//!
//! A mask template describes how a raw field value is formatted for display.
//! `{` and `}` delimit replaceable runs and never appear in input or output;
//! inside a run `9` matches one digit and `*` matches any character. Every
//! character outside a run is a literal separator that is inserted into the
//! formatted value and stripped again when the raw value is recovered.
//!
//! Example: template `{{99}} {{99}}` formats `1226` as `12 26`.

/// Sentinel accepted at a `9` position in addition to digits.
///
/// Values that were partially obfuscated for display re-enter the engine
/// with this placeholder standing in for hidden digits; it must not be
/// rejected.
const PLACEHOLDER: char = '*';

/// One position of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaskToken {
    /// `9` inside a delimited run: one digit (or the placeholder).
    Digit,
    /// `*` inside a delimited run: any character.
    Wildcard,
    /// A character outside a delimited run, inserted verbatim.
    Literal(char),
}

/// Parses a template into its positions, stripping the `{`/`}` delimiters.
fn tokenize(template: &str) -> Vec<MaskToken> {
    let mut tokens = Vec::with_capacity(template.len());
    let mut inside = false;
    for c in template.chars() {
        match c {
            '{' => inside = true,
            '}' => inside = false,
            '9' if inside => tokens.push(MaskToken::Digit),
            '*' if inside => tokens.push(MaskToken::Wildcard),
            other => tokens.push(MaskToken::Literal(other)),
        }
    }
    tokens
}

/// Formats a raw value according to a template.
///
/// Without a template the value is returned unchanged. Input characters a
/// `9` position cannot accept are dropped; literal separators are inserted
/// where the template demands them (and not duplicated when the value
/// already contains them); input beyond the template's capacity is dropped.
pub fn apply_mask(template: Option<&str>, raw: &str) -> String {
    let Some(template) = template else {
        return raw.to_string();
    };

    let tokens = tokenize(template);
    let input: Vec<char> = raw.chars().collect();
    let mut formatted = String::with_capacity(tokens.len());

    let mut ti = 0;
    let mut vi = 0;
    while ti < tokens.len() && vi < input.len() {
        let c = input[vi];
        match tokens[ti] {
            MaskToken::Digit => {
                if c.is_ascii_digit() || c == PLACEHOLDER {
                    formatted.push(c);
                    ti += 1;
                    vi += 1;
                } else {
                    // Unacceptable character: drop it, stay on this slot.
                    vi += 1;
                }
            }
            MaskToken::Wildcard => {
                formatted.push(c);
                ti += 1;
                vi += 1;
            }
            MaskToken::Literal(lit) => {
                formatted.push(lit);
                ti += 1;
                if c == lit {
                    // Value already contains the separator.
                    vi += 1;
                }
            }
        }
    }

    formatted
}

/// Recovers the raw value from a formatted one.
///
/// Walks the raw template toggling an inside-braces flag: each non-brace
/// template position consumes one input character, which is kept only while
/// inside a delimited run. Characters under literal positions and input
/// beyond the template's capacity are discarded. Without a template the
/// value is returned trimmed of surrounding whitespace.
pub fn remove_mask(template: Option<&str>, formatted: &str) -> String {
    let Some(template) = template else {
        return formatted.trim().to_string();
    };

    let input: Vec<char> = formatted.chars().collect();
    let mut raw = String::with_capacity(input.len());
    let mut inside = false;
    let mut vi = 0;

    for c in template.chars() {
        match c {
            '{' => inside = true,
            '}' => inside = false,
            _ => {
                if vi >= input.len() {
                    break;
                }
                if inside {
                    raw.push(input[vi]);
                }
                vi += 1;
            }
        }
    }

    raw
}

/// Number of characters a formatted value can hold, -1 without a template.
pub fn mask_capacity(template: Option<&str>) -> i32 {
    match template {
        Some(template) => tokenize(template).len() as i32,
        None => -1,
    }
}
