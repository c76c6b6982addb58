//! List kinds and ordinal labels for `li` markers.

use std::fmt;

/// Kind of the nearest enclosing list element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    None,
    Unordered,
    Ordered,
}

/// Label style of an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalStyle {
    /// 1, 2, 3, ...
    Digit,
    /// a, b, ..., z, aa, ab, ...
    Letter,
}

/// Next label to emit for an `li` under an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordinal {
    style: OrdinalStyle,
    /// 1-based position
    value: usize,
}

impl Ordinal {
    /// First label for an `ol` with `depth` enclosing `ol` elements, itself included.
    ///
    /// Even nesting levels (depth 1, 3, ...) count with digits, odd levels with letters.
    pub fn for_depth(depth: usize) -> Self {
        let style = if depth % 2 == 1 {
            OrdinalStyle::Digit
        } else {
            OrdinalStyle::Letter
        };
        Self { style, value: 1 }
    }

    pub fn advance(&mut self) {
        self.value += 1;
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            OrdinalStyle::Digit => write!(f, "{}", self.value),
            OrdinalStyle::Letter => {
                // bijective base 26
                let mut n = self.value;
                let mut letters = Vec::new();
                while n > 0 {
                    n -= 1;
                    letters.push(b'a' + (n % 26) as u8);
                    n /= 26;
                }
                letters.reverse();
                f.write_str(&String::from_utf8_lossy(&letters))
            }
        }
    }
}
