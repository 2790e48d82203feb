// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host classification used to pick the default formatting strategy.
//!
//! The classification is resolved once, when a [`SharedConfig`](crate::SharedConfig)
//! is constructed, and stored there as an ordinary configuration input. It is
//! never re-probed on the logging path, and a hosting application (or a test)
//! can override it with [`SharedConfig::set_runtime`](crate::SharedConfig::set_runtime).

/// The kind of host this process is running in.
///
/// The variant decides the default sink's formatting: styled console calls in
/// a browser tab, a styled text line on a terminal, a plain or JSON line on a
/// headless server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    /// A wasm browser tab; output goes to the tab's console channels.
    Browser,
    /// A terminal-attached process; supports styled output.
    Terminal,
    /// A server process with redirected output; plain or JSON lines.
    Headless,
    /// Could not be classified; treated like [`Runtime::Headless`] minus styling.
    Unknown,
}

impl Runtime {
    /// Classifies the current host. Pure, total, and cheap.
    ///
    /// Detection order is fixed: the browser marker is compile-time and wins
    /// outright; the tty probe comes next, since a terminal would also pass
    /// the weaker headless check but not vice versa.
    pub fn detect() -> Runtime {
        #[cfg(target_arch = "wasm32")]
        {
            Runtime::Browser
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::IsTerminal;
            if std::io::stderr().is_terminal() {
                Runtime::Terminal
            } else {
                Runtime::Headless
            }
        }
    }

    /// Whether this runtime has a native styled-output mechanism.
    pub fn supports_styling(self) -> bool {
        matches!(self, Runtime::Browser | Runtime::Terminal)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_always_classifies() {
        // The probe must return one of the four variants without panicking,
        // whatever environment the test runs in.
        let rt = Runtime::detect();
        assert!(matches!(
            rt,
            Runtime::Browser | Runtime::Terminal | Runtime::Headless | Runtime::Unknown
        ));
    }

    #[test]
    fn styling_support() {
        assert!(Runtime::Browser.supports_styling());
        assert!(Runtime::Terminal.supports_styling());
        assert!(!Runtime::Headless.supports_styling());
        assert!(!Runtime::Unknown.supports_styling());
    }
}
