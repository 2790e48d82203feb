// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument values accepted by the logger methods.
//!
//! Rather than a variadic list of opaque values, arguments are a tagged
//! union: the normalizer and the sinks pattern-match on the variant instead
//! of probing values for marker fields. [`From`] impls cover the common
//! primitives, and the [`args!`](crate::args) macro builds a heterogeneous
//! list in one expression.

use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// A value with two renderings: a structured one that may fail, and a plain
/// one that cannot.
///
/// This is the escape hatch for logging values that are not [`serde_json::Value`]
/// shaped. The structured form feeds stringify and the JSON line mode; when
/// it fails (self-referential data, a failing `Serialize` impl), the plain
/// form is used instead. That fallback is a hard guarantee of the pipeline,
/// never an error.
pub trait ToStructured: Debug + Send + Sync {
    /// Structured (JSON) rendering of the value.
    fn structured(&self) -> Result<Value, serde_json::Error>;

    /// Plain rendering, used when [`structured`](Self::structured) fails.
    fn plain(&self) -> String;
}

/// One positional argument of a log call.
#[derive(Debug, Clone)]
pub enum Arg {
    /// Plain text.
    Str(String),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A structured value, emitted as-is in JSON mode.
    Json(Value),
    /// An error-like value carrying its cause-chain text. JSON mode
    /// serializes the chain text in place of the raw value.
    Error {
        /// The top-level error message.
        message: String,
        /// The full cause chain, one cause per line.
        stack: String,
    },
    /// A pre-styled fragment, built with [`styled`](crate::styled).
    Styled {
        /// The fragment text.
        text: String,
        /// Opaque style string: SGR parameters on terminals, CSS on wasm.
        style: String,
    },
    /// An opaque value rendered through [`ToStructured`].
    Dyn(Arc<dyn ToStructured>),
}

impl Arg {
    /// Builds an [`Arg::Error`] from any error, flattening its cause chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Arg {
        let message = err.to_string();
        let mut stack = message.clone();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\ncaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Arg::Error { message, stack }
    }

    /// The string coercion used for method return values and text output.
    ///
    /// Plain strings come through unquoted; structured values render as
    /// compact JSON; error-like values render as their cause-chain text.
    pub fn to_display_string(&self) -> String {
        match self {
            Arg::Str(s) => s.clone(),
            Arg::Int(i) => i.to_string(),
            Arg::Float(v) => v.to_string(),
            Arg::Bool(b) => b.to_string(),
            Arg::Json(Value::String(s)) => s.clone(),
            Arg::Json(v) => v.to_string(),
            Arg::Error { message, stack } => {
                if stack.is_empty() {
                    message.clone()
                } else {
                    stack.clone()
                }
            }
            Arg::Styled { text, .. } => text.clone(),
            Arg::Dyn(v) => match v.structured() {
                Ok(Value::String(s)) => s,
                Ok(json) => json.to_string(),
                Err(_) => v.plain(),
            },
        }
    }

    /// Whether stringify leaves the value untouched.
    pub(crate) fn is_primitive(&self) -> bool {
        matches!(
            self,
            Arg::Str(_) | Arg::Int(_) | Arg::Float(_) | Arg::Bool(_)
        )
    }

    /// The value for the JSON line mode. Infallible: a failing structured
    /// rendering degrades to the plain string.
    pub(crate) fn to_json_value(&self) -> Value {
        match self {
            Arg::Str(s) => Value::String(s.clone()),
            Arg::Int(i) => Value::from(*i),
            Arg::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(v.to_string())),
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Json(v) => v.clone(),
            Arg::Error { message, stack } => Value::String(if stack.is_empty() {
                message.clone()
            } else {
                stack.clone()
            }),
            Arg::Styled { text, .. } => Value::String(text.clone()),
            Arg::Dyn(v) => v
                .structured()
                .unwrap_or_else(|_| Value::String(v.plain())),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<u32> for Arg {
    fn from(v: u32) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Json(v)
    }
}

impl From<Arc<dyn ToStructured>> for Arg {
    fn from(v: Arc<dyn ToStructured>) -> Self {
        Arg::Dyn(v)
    }
}

/*
Boilerplate notes.

PartialEq is deliberately absent: Dyn carries a trait object, and pointer
equality would give the other variants surprising company. Tests compare
display strings instead.
Copy is out (heap data), Ord makes no sense, Display is intentionally a
named method (to_display_string) because the coercion is part of the API
contract, not cosmetics.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_coercions() {
        assert_eq!(Arg::from("bar").to_display_string(), "bar");
        assert_eq!(Arg::from(42).to_display_string(), "42");
        assert_eq!(Arg::from(true).to_display_string(), "true");
        assert_eq!(
            Arg::from(json!({"method": "GET"})).to_display_string(),
            "{\"method\":\"GET\"}"
        );
        // A JSON string coerces without quotes, same as a plain string.
        assert_eq!(Arg::from(json!("hi")).to_display_string(), "hi");
    }

    #[test]
    fn error_chain_flattening() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let arg = Arg::from_error(&inner);
        match &arg {
            Arg::Error { message, stack } => {
                assert_eq!(message, "missing");
                assert!(stack.contains("missing"));
            }
            other => panic!("expected Error variant, got {other:?}"),
        }
    }

    #[test]
    fn json_value_of_error_is_chain_text() {
        let arg = Arg::Error {
            message: "boom".into(),
            stack: "boom\ncaused by: io".into(),
        };
        assert_eq!(arg.to_json_value(), json!("boom\ncaused by: io"));
    }

    #[derive(Debug)]
    struct NeverStructured;
    impl ToStructured for NeverStructured {
        fn structured(&self) -> Result<Value, serde_json::Error> {
            use serde::ser::Error as _;
            Err(serde_json::Error::custom("cyclic"))
        }
        fn plain(&self) -> String {
            "<cyclic>".to_string()
        }
    }

    #[test]
    fn dyn_falls_back_to_plain() {
        let arg = Arg::Dyn(Arc::new(NeverStructured));
        assert_eq!(arg.to_display_string(), "<cyclic>");
        assert_eq!(arg.to_json_value(), json!("<cyclic>"));
    }
}
