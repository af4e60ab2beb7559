//! Closing-parenthesis search for function calls inside values

use std::fmt;

/// The scan reached the end of the text with parentheses still open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnbalancedParens {
    /// Parentheses still open at the end of the text
    pub open: usize,
}

impl fmt::Display for UnbalancedParens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unclosed parenthes(es)", self.open)
    }
}

impl std::error::Error for UnbalancedParens {}

/// Find the `)` matching an already opened `(`.
///
/// `start` is the byte index just past the opening parenthesis. Returns the byte
/// index of the parenthesis that brings the depth back to zero.
pub fn find_closing_paren(text: &str, start: usize) -> Result<usize, UnbalancedParens> {
    let mut depth = 1usize;
    let bytes = text.as_bytes();

    for (index, byte) in bytes.iter().enumerate().skip(start) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
            _ => {}
        }
    }

    Err(UnbalancedParens { open: depth })
}
