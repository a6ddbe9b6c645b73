//! Per-entry deserialization for collections loaded from the data file.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// An entry that either parses as `T` or is kept aside as unreadable.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Entry<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Entry<T> {
    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}
