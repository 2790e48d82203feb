// SPDX-License-Identifier: MIT OR Apache-2.0

/// A label identifying the module a log line originated from.
///
/// A namespace may be explicitly absent; [`Namespace::NONE`] is the absent
/// marker. Sinks omit the bracketed segment entirely in that case rather
/// than emitting empty brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace(Option<String>);

impl Namespace {
    /// The explicit "no namespace" marker.
    pub const NONE: Namespace = Namespace(None);

    pub fn new(label: impl Into<String>) -> Self {
        Namespace(Some(label.into()))
    }

    /// The label, or `None` for the absent marker.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The `[label]` token, or `None` for the absent marker.
    pub(crate) fn bracketed(&self) -> Option<String> {
        self.0.as_deref().map(|label| format!("[{label}]"))
    }
}

impl From<&str> for Namespace {
    fn from(label: &str) -> Self {
        Namespace::new(label)
    }
}

impl From<String> for Namespace {
    fn from(label: String) -> Self {
        Namespace::new(label)
    }
}

impl From<Option<&str>> for Namespace {
    fn from(label: Option<&str>) -> Self {
        Namespace(label.map(str::to_string))
    }
}

impl From<Option<String>> for Namespace {
    fn from(label: Option<String>) -> Self {
        Namespace(label)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(label) => f.write_str(label),
            None => Ok(()),
        }
    }
}

/*
Boilerplate notes.

Default is the absent marker, which is the only sensible zero value.
Ord would impose a meaningless ordering between absent and named; skipped.
Deref to Option<String> would leak the representation; accessors instead.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_omits_absent() {
        assert_eq!(Namespace::from("api").bracketed().as_deref(), Some("[api]"));
        assert_eq!(Namespace::NONE.bracketed(), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(Namespace::from(None::<&str>), Namespace::NONE);
        assert_eq!(Namespace::from("foo").as_deref(), Some("foo"));
    }
}
