use std::borrow::Cow;
use std::fmt;

/// Opaque identity of one independent reason for locking a gate.
///
/// Two requests with equal `SourceId`s share a single lock slot. Names and
/// numeric ids never compare equal to each other, so `"7"` and `7` are
/// distinct sources.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SourceId {
    Name(Cow<'static, str>),
    Id(u64),
}

impl SourceId {
    /// Slot shared by every caller that does not name itself.
    pub const COMMON: SourceId = SourceId::Name(Cow::Borrowed("common"));

    pub const fn named(name: &'static str) -> Self {
        SourceId::Name(Cow::Borrowed(name))
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::COMMON
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Name(name) => f.write_str(name),
            SourceId::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&'static str> for SourceId {
    fn from(name: &'static str) -> Self {
        SourceId::Name(Cow::Borrowed(name))
    }
}

impl From<String> for SourceId {
    fn from(name: String) -> Self {
        SourceId::Name(Cow::Owned(name))
    }
}

impl From<u64> for SourceId {
    fn from(id: u64) -> Self {
        SourceId::Id(id)
    }
}

impl From<u32> for SourceId {
    fn from(id: u32) -> Self {
        SourceId::Id(u64::from(id))
    }
}

impl From<usize> for SourceId {
    fn from(id: usize) -> Self {
        SourceId::Id(id as u64)
    }
}

impl From<&SourceId> for SourceId {
    fn from(source: &SourceId) -> Self {
        source.clone()
    }
}
