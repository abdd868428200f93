use std::cmp::Ordering;

/// One run of a file name: either a maximal run of ASCII digits or the text
/// between two such runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    Text(String),
    /// Digits with leading zeros stripped, so equal values compare equal
    /// regardless of padding and runs of any length are supported.
    Number(String),
}

impl Ord for KeyToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyToken::Number(a), KeyToken::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (KeyToken::Text(a), KeyToken::Text(b)) => a.cmp(b),
            (KeyToken::Number(_), KeyToken::Text(_)) => Ordering::Less,
            (KeyToken::Text(_), KeyToken::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key that orders embedded numbers by value ("ep2" before "ep10").
///
/// Tokens always alternate text/number and always start and end with a text
/// token (possibly empty), so two keys only ever compare like with like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<KeyToken>);

impl NaturalKey {
    pub fn new(name: &str) -> Self {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut chars = name.chars().peekable();

        while let Some(c) = chars.next() {
            if !c.is_ascii_digit() {
                text.push(c);
                continue;
            }

            tokens.push(KeyToken::Text(std::mem::take(&mut text)));

            let mut digits = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits.push(next);
                chars.next();
            }
            tokens.push(KeyToken::Number(strip_leading_zeros(&digits)));
        }

        tokens.push(KeyToken::Text(text));
        Self(tokens)
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }
}

fn strip_leading_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sort items in natural order of the name `name_of` extracts.
pub fn sort_natural<T, F, K>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> K,
    K: AsRef<str>,
{
    items.sort_by_cached_key(|item| NaturalKey::new(name_of(item).as_ref()));
}
