// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! NF-e access key shape rules: digits only, exactly 44 of them.

/// Number of digits in a complete access key.
pub const ACCESS_KEY_LEN: usize = 44;

/// Strip every non-digit character and truncate to [`ACCESS_KEY_LEN`].
///
/// Pasted text is filtered rather than rejected, so `"12ab34"` becomes `"1234"`.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(ACCESS_KEY_LEN)
        .collect()
}

/// Shape of a sanitized access key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyShape {
    /// Nothing typed yet.
    Empty,
    /// Some digits typed; `remaining` more are needed.
    Incomplete { len: usize, remaining: usize },
    /// Exactly [`ACCESS_KEY_LEN`] digits.
    Complete,
}

/// Classify a sanitized value by its digit count.
pub fn classify(sanitized: &str) -> KeyShape {
    let len = sanitized.chars().count();
    match len {
        0 => KeyShape::Empty,
        ACCESS_KEY_LEN => KeyShape::Complete,
        len => KeyShape::Incomplete {
            len,
            remaining: ACCESS_KEY_LEN.saturating_sub(len),
        },
    }
}
