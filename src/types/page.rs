// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Serialized block results and pages
//!
//! - [`SerializedBlock`]: one block's result, already rendered to JSON
//! - [`Page`]: the ordered answer to one scan request

use std::fmt;
use std::sync::Arc;

/// A block's text result in its final JSON form
///
/// The cache stores these so that serving a cached block never re-serializes.
/// Cloning is cheap (shared string).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedBlock(Arc<str>);

impl SerializedBlock {
    /// Returns the JSON text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the JSON text in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the JSON text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SerializedBlock {
    fn from(json: String) -> Self {
        Self(Arc::from(json))
    }
}

impl From<&str> for SerializedBlock {
    fn from(json: &str) -> Self {
        Self(Arc::from(json))
    }
}

impl fmt::Display for SerializedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered result of one scan
///
/// Entries are in strictly increasing block order and never exceed the
/// requested count. A page that is shorter than requested means the scan
/// reached the end of the available chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    entries: Vec<SerializedBlock>,
}

impl Page {
    /// Creates an empty page with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: SerializedBlock) {
        self.entries.push(entry);
    }

    /// Number of blocks on this page
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no block on this page
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The serialized entries, in block order
    pub fn entries(&self) -> &[SerializedBlock] {
        &self.entries
    }

    /// Renders the page as a JSON array
    ///
    /// Entries are joined verbatim; an empty page renders as `[]`.
    ///
    /// ```rust
    /// use blocktext::Page;
    ///
    /// assert_eq!(Page::default().to_json(), "[]");
    /// ```
    pub fn to_json(&self) -> String {
        let body: usize = self.entries.iter().map(SerializedBlock::len).sum();
        let mut out = String::with_capacity(body + self.entries.len() + 2);
        out.push('[');
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(entry.as_str());
        }
        out.push(']');
        out
    }
}

impl FromIterator<SerializedBlock> for Page {
    fn from_iter<I: IntoIterator<Item = SerializedBlock>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
