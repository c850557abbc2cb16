//! Arguments of a log call and their deep rendering.
//!
//! Log calls take any number of heterogeneous values. Rather than inspecting them at run
//! time, each argument is converted into a [`Value`] up front (the `stack_log!` macros do
//! this with `Value::from`), and rendering walks that tree.
//!
//! Rendering rules:
//!
//! - sequences: `[a, b, c]`, recursively, element by element
//! - maps: `{"k": v}`
//! - strings: quoted and escaped, `"x"`
//! - chars: `'c'`
//! - `Null`: `null`
//! - numbers and bools: their usual Rust formatting, which is locale independent
//! - `Other`: the text it was captured with
//!
//! ```
//! use stacklog::Value;
//!
//! let args = Value::from(vec![Value::from(1), Value::from(vec!["a", "b"])]);
//! assert_eq!(args.to_string(), r#"[1, ["a", "b"]]"#);
//! ```

use std::fmt::{self, Display, Formatter, Write};

/// A loggable argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Seq(Vec<Value>),
    /// Key/value pairs in insertion order.
    Map(Vec<(Value, Value)>),
    /// Anything else, kept as already-rendered text.
    Other(String),
}

impl Value {
    /// Captures a value through its `Debug` implementation.
    ///
    /// ```
    /// use stacklog::Value;
    ///
    /// #[derive(Debug)]
    /// struct Point { x: i32 }
    ///
    /// assert_eq!(Value::debug(&Point { x: 1 }).to_string(), "Point { x: 1 }");
    /// ```
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Other(format!("{:?}", value))
    }

    /// Captures a value through its `Display` implementation, unquoted.
    pub fn display<T: Display + ?Sized>(value: &T) -> Self {
        Value::Other(value.to_string())
    }

    /// Converts any serializable value into a `Value` tree.
    ///
    /// Structs become maps and sequences stay sequences, so nested data renders deeply.
    /// If serialization fails the error text is captured instead; logging never fails.
    ///
    /// ```
    /// use stacklog::Value;
    ///
    /// #[derive(serde::Serialize)]
    /// struct Job { id: u32, tags: Vec<&'static str> }
    ///
    /// let job = Job { id: 7, tags: vec!["a"] };
    /// assert_eq!(Value::from_serialize(&job).to_string(), r#"{"id": 7, "tags": ["a"]}"#);
    /// ```
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::from(json),
            Err(e) => Value::Other(format!("<unserializable: {}>", e)),
        }
    }
}

/// Renders an argument list the same way a [`Value::Seq`] renders.
pub fn render_list(values: &[Value]) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_seq(&mut out, values);
    out
}

fn write_seq<W: Write>(out: &mut W, values: &[Value]) -> fmt::Result {
    out.write_char('[')?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{}", value)?;
    }
    out.write_char(']')
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Seq(values) => write_seq(f, values),
            Value::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_char('}')
            }
            Value::Other(text) => f.write_str(text),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self { Value::Int(v as i64) }
        }
    )*};
}
macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self { Value::UInt(v as u64) }
        }
    )*};
}
from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        i64::try_from(v)
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Other(v.to_string()))
    }
}

impl From<u128> for Value {
    fn from(v: u128) -> Self {
        u64::try_from(v)
            .map(Value::UInt)
            .unwrap_or_else(|_| Value::Other(v.to_string()))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Seq(v.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(x) = n.as_f64() {
                    Value::Float(x)
                } else {
                    Value::Other(n.to_string())
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sequences_render_deeply() {
        let args = [Value::from(1), Value::from(vec!["a", "b"])];
        assert_eq!(render_list(&args), r#"[1, ["a", "b"]]"#);

        let deep = Value::from(vec![vec![vec![1u8]], vec![]]);
        assert_eq!(deep.to_string(), "[[[1]], []]");
    }

    #[test]
    fn scalars() {
        assert_eq!(render_list(&[]), "[]");
        assert_eq!(
            render_list(&[
                Value::from(-3i8),
                Value::from(u64::MAX),
                Value::from(1.5f64),
                Value::from(true),
                Value::from('c'),
                Value::from(None::<i32>),
                Value::from(()),
            ]),
            "[-3, 18446744073709551615, 1.5, true, 'c', null, null]"
        );
    }

    #[test]
    fn large_numbers_are_not_grouped() {
        assert_eq!(Value::from(1234567i32).to_string(), "1234567");
        assert_eq!(Value::from(1e21f64).to_string(), "1000000000000000000000");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(Value::from("x").to_string(), r#""x""#);
        assert_eq!(Value::from("a\"b\n").to_string(), r#""a\"b\n""#);
    }

    #[test]
    fn wide_integers_fall_back_to_text() {
        assert_eq!(Value::from(i128::MAX), Value::Other(i128::MAX.to_string()));
        assert_eq!(Value::from(7u128), Value::UInt(7));
    }

    #[test]
    fn json_objects_become_maps() {
        let json = serde_json::json!({"name": "x", "ids": [1, 2], "ok": null});
        // serde_json's default map is ordered by key
        assert_eq!(
            Value::from(json).to_string(),
            r#"{"ids": [1, 2], "name": "x", "ok": null}"#
        );
    }

    #[test]
    fn other_is_verbatim() {
        assert_eq!(Value::display("plain").to_string(), "plain");
        assert_eq!(Value::debug(&Some(1)).to_string(), "Some(1)");
    }
}
