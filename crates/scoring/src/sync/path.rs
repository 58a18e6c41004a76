use std::fmt;

use super::SyncError;

const FORBIDDEN: &[char] = &['.', '#', '$', '[', ']'];

/// Slash-separated location in the hierarchical store.
///
/// The empty path addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Result<Self, SyncError> {
        let mut path = Self::root();
        for segment in raw.split('/').filter(|s| !s.is_empty()) {
            path = path.child(segment)?;
        }
        Ok(path)
    }

    pub fn child(&self, segment: impl AsRef<str>) -> Result<Self, SyncError> {
        let segment = segment.as_ref();
        if segment.is_empty() || segment.contains('/') || segment.contains(FORBIDDEN) {
            return Err(SyncError::InvalidPath(format!("{}/{}", self, segment)));
        }

        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Appends a relative, possibly multi-segment path.
    pub fn join(&self, relative: &str) -> Result<Self, SyncError> {
        let mut path = self.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            path = path.child(segment)?;
        }
        Ok(path)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn starts_with(&self, prefix: &StorePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// True when a change at one path can alter the value seen at the other.
    pub fn overlaps(&self, other: &StorePath) -> bool {
        self.starts_with(other) || other.starts_with(self)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
