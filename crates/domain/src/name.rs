use std::fmt;
use std::sync::Arc;

/// A DNS owner name, stored canonicalized (lowercase, single trailing dot).
///
/// Cloning is an `Arc` bump, matching the cheap-clone idiom the rest of
/// the analysis graph relies on (names are shared across thousands of
/// witness sets and map keys).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(Arc::from(Self::canonicalize(raw.as_ref()).as_str()))
    }

    pub fn root() -> Self {
        Self(Arc::from("."))
    }

    fn canonicalize(raw: &str) -> String {
        let trimmed = raw.trim_end_matches('.');
        if trimmed.is_empty() {
            return ".".to_string();
        }
        format!("{}.", trimmed.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "."
    }

    /// Number of labels, root has zero.
    pub fn label_count(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.trim_end_matches('.').split('.').count()
        }
    }

    /// The immediate parent name, or `None` for the root.
    pub fn parent(&self) -> Option<Name> {
        if self.is_root() {
            return None;
        }
        let trimmed = self.0.trim_end_matches('.');
        match trimmed.split_once('.') {
            Some((_, rest)) => Some(Name::new(rest)),
            None => Some(Name::root()),
        }
    }

    /// Whether `self` is equal to or a descendant of `other`.
    pub fn is_subdomain_of(&self, other: &Name) -> bool {
        if other.is_root() {
            return true;
        }
        if self == other {
            return true;
        }
        let suffix = format!(".{}", other.0);
        self.0.ends_with(&suffix)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::new(&s)
    }
}

impl serde::Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
