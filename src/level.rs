use serde::Serialize;

/// Severity of a single log call.
///
/// The four variants map one-to-one onto the four logger methods and onto the
/// fixed names used in text and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Emitted by the `debug` method; subject to the debug-enabled switch
    Debug,
    /// Emitted by the `log` method
    Info,
    /// Emitted by the `warn` method
    Warning,
    /// Emitted by the `error` method
    Error,
}

impl Level {
    /// The fixed wire name: `DEBUG`, `INFO`, `WARNING` or `ERROR`.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_fixed() {
        assert_eq!(Level::Debug.as_str(), "DEBUG");
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Warning.as_str(), "WARNING");
        assert_eq!(Level::Error.as_str(), "ERROR");
    }

    #[test]
    fn serializes_to_wire_name() {
        assert_eq!(serde_json::to_string(&Level::Warning).unwrap(), "\"WARNING\"");
    }
}
