//! Comment lookup in `SourceCodeInfo`.
//!
//! Each `Location` pairs a declaration path with the comments `protoc` found
//! around that declaration. Lookup is an exact path match over the whole
//! table.

use serde::{Deserialize, Serialize};

/// One `google.protobuf.SourceCodeInfo.Location` record (JSON form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub path: Vec<i32>,
    #[serde(default)]
    pub span: Vec<i32>,
    #[serde(
        default,
        rename = "leadingComments",
        skip_serializing_if = "Option::is_none"
    )]
    pub leading_comments: Option<String>,
    #[serde(
        default,
        rename = "trailingComments",
        skip_serializing_if = "Option::is_none"
    )]
    pub trailing_comments: Option<String>,
    #[serde(
        default,
        rename = "leadingDetachedComments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub leading_detached_comments: Vec<String>,
}

impl Location {
    /// A location with only a path; comments are added with the `with_*` helpers.
    pub fn new(path: impl Into<Vec<i32>>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_leading(mut self, text: impl Into<String>) -> Self {
        self.leading_comments = Some(text.into());
        self
    }

    pub fn with_trailing(mut self, text: impl Into<String>) -> Self {
        self.trailing_comments = Some(text.into());
        self
    }

    pub fn with_leading_detached(mut self, text: impl Into<String>) -> Self {
        self.leading_detached_comments.push(text.into());
        self
    }

    fn matches(&self, target: &[i32]) -> bool {
        if self.path.len() != target.len() {
            return false;
        }
        self.path.iter().zip(target).all(|(have, want)| have == want)
    }
}

/// The comments attached to one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSet {
    pub leading_detached: Vec<String>,
    pub leading: String,
    pub trailing: String,
}

impl CommentSet {
    /// Resolves the comments recorded for exactly `target`.
    ///
    /// No match yields the empty set. If the table lists the same path more
    /// than once, the last record wins.
    pub fn for_path(locations: &[Location], target: &[i32]) -> Self {
        let mut set = CommentSet::default();
        for location in locations.iter().filter(|l| l.matches(target)) {
            set.leading = location.leading_comments.clone().unwrap_or_default();
            set.trailing = location.trailing_comments.clone().unwrap_or_default();
            set.leading_detached = location.leading_detached_comments.clone();
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.leading_detached.is_empty() && self.leading.is_empty() && self.trailing.is_empty()
    }
}
