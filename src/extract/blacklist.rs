// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Printable-character classification and the glyph blacklist

use std::collections::HashSet;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Code points that pass the printable check but are decoding noise.
///
/// Latin-1 leftovers show up when binary calldata happens to contain bytes
/// that form two-byte UTF-8 sequences; U+FFFD marks invalid input.
const STANDARD_GLYPHS: [char; 8] = [
    '\u{00DB}', '\u{00EF}', '\u{00BF}', '\u{00BD}', '\u{008E}', '\u{00CF}', '\u{0000}', '\u{FFFD}',
];

/// Immutable set of code points excluded from extracted text
///
/// Built once at startup and owned by the [`TextExtractor`](super::TextExtractor).
///
/// # Examples
///
/// ```rust
/// use blocktext::GlyphBlacklist;
///
/// let blacklist = GlyphBlacklist::standard();
/// assert!(blacklist.contains('\u{FFFD}'));
/// assert!(!blacklist.contains('a'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBlacklist {
    glyphs: HashSet<char>,
}

impl GlyphBlacklist {
    /// The blacklist used by the server
    pub fn standard() -> Self {
        Self::new(STANDARD_GLYPHS)
    }

    /// Builds a blacklist from an arbitrary set of code points
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Self {
        Self {
            glyphs: glyphs.into_iter().collect(),
        }
    }

    /// Returns `true` if `c` is blacklisted
    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains(&c)
    }

    /// Number of blacklisted code points
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if nothing is blacklisted
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Printable and not blacklisted
    pub fn admits(&self, c: char) -> bool {
        is_printable(c) && !self.contains(c)
    }
}

impl Default for GlyphBlacklist {
    fn default() -> Self {
        Self::standard()
    }
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space.
///
/// Other separators (tabs, newlines, no-break space), controls, format
/// characters, private use and unassigned code points are not printable.
pub fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    if c == ' ' {
        return true;
    }
    matches!(
        get_general_category(c),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | NonspacingMark
            | SpacingMark
            | EnclosingMark
            | DecimalNumber
            | LetterNumber
            | OtherNumber
            | ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
            | OtherSymbol
    )
}
