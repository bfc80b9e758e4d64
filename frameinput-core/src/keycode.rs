use std::fmt;

/// Named keys accepted by string lookups, with their DOM key codes.
const NAMED_KEYS: [(&str, u32); 12] = [
    ("TAB", 9),
    ("ENTER", 13),
    ("SHIFT", 16),
    ("CONTROL", 17),
    ("ALT", 18),
    ("ESCAPE", 27),
    ("LEFT", 37),
    ("UP", 38),
    ("RIGHT", 39),
    ("DOWN", 40),
    ("DELETE", 46),
    ("WIN", 91),
];

/// A key argument: either a raw key code or a key name / character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Code(u32),
    Name(&'a str),
}

impl From<u32> for Key<'_> {
    fn from(code: u32) -> Self {
        Key::Code(code)
    }
}

impl From<i32> for Key<'_> {
    fn from(code: i32) -> Self {
        Key::Code(u32::try_from(code).unwrap_or(0))
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl From<char> for Key<'_> {
    fn from(c: char) -> Self {
        // Uppercase first so 'a' and "a" agree.
        let code = c
            .to_uppercase()
            .next()
            .and_then(|upper| upper.encode_utf16(&mut [0u16; 2]).first().copied())
            .unwrap_or(0);
        Key::Code(u32::from(code))
    }
}

/// Normalized key identifier, e.g. `U+000D` for Enter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyIdentifier(String);

impl KeyIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a key argument to its numeric key code.
///
/// Names are matched case-insensitively against the named-key table; any
/// other string maps to the UTF-16 code of its first uppercased character.
pub fn to_key_code<'k>(key: impl Into<Key<'k>>) -> u32 {
    match key.into() {
        Key::Code(code) => code,
        Key::Name(name) => {
            let upper = name.to_uppercase();
            NAMED_KEYS
                .iter()
                .find(|(named, _)| *named == upper)
                .map(|&(_, code)| code)
                .or_else(|| upper.encode_utf16().next().map(u32::from))
                .unwrap_or(0)
        }
    }
}

/// `U+` followed by the uppercase hex key code, padded to four digits.
pub fn to_key_identifier<'k>(key: impl Into<Key<'k>>) -> KeyIdentifier {
    KeyIdentifier(format!("U+{:04X}", to_key_code(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── to_key_code ──

    #[test]
    fn test_named_keys_case_insensitive() {
        assert_eq!(to_key_code("enter"), 13);
        assert_eq!(to_key_code("Escape"), 27);
        assert_eq!(to_key_code("WIN"), 91);
        assert_eq!(to_key_code("left"), 37);
    }

    #[test]
    fn test_single_char_uses_uppercase_code() {
        assert_eq!(to_key_code("a"), 65);
        assert_eq!(to_key_code("A"), 65);
        assert_eq!(to_key_code('z'), 90);
        assert_eq!(to_key_code("1"), 49);
    }

    #[test]
    fn test_unknown_name_uses_first_char() {
        assert_eq!(to_key_code("space"), 83);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(to_key_code(13u32), 13);
        assert_eq!(to_key_code(0x1F600u32), 0x1F600);
    }

    #[test]
    fn test_empty_string_is_zero() {
        assert_eq!(to_key_code(""), 0);
    }

    // ── to_key_identifier ──

    #[test]
    fn test_identifier_padding() {
        assert_eq!(to_key_identifier(13u32).as_str(), "U+000D");
        assert_eq!(to_key_identifier(9u32).as_str(), "U+0009");
        assert_eq!(to_key_identifier(0xABCDu32).as_str(), "U+ABCD");
        assert_eq!(to_key_identifier(0x1F600u32).as_str(), "U+1F600");
    }

    #[test]
    fn test_numeric_and_string_agree() {
        assert_eq!(to_key_identifier(65u32), to_key_identifier("a"));
        assert_eq!(to_key_identifier(65u32), to_key_identifier('a'));
        assert_eq!(to_key_identifier(13u32), to_key_identifier("ENTER"));
        assert_eq!(to_key_identifier("a").to_string(), "U+0041");
    }
}
