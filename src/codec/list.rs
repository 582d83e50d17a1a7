//! Space-separated list encoding.
//!
//! A list is written as the canonical text of each element followed by a
//! single space, so `[1, 2, 3]` becomes `"1 2 3 "` and an empty list becomes
//! `""`. An absent nullable list is written as the literal `null`.
//!
//! Reading splits on spaces and ignores empty tokens. String elements that
//! contain spaces, or a single string element equal to `null`, cannot be
//! represented unambiguously.

use crate::{codec::scalar::ScalarText, Result};

/// Literal used for an absent (`None`) nullable list.
pub const NULL_LIST: &str = "null";

/// Writes a list in its space-separated form.
#[allow(clippy::ptr_arg)]
pub fn write_list<T: ScalarText>(values: &Vec<T>, out: &mut String) {
    for value in values {
        value.write_text(out);
        out.push(' ');
    }
}

/// Reads a non-nullable list.
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] if an element fails to parse or if the
/// text is the `null` literal, which has no representation in a `Vec<T>`.
pub fn read_list<T: ScalarText>(text: &str) -> Result<Vec<T>> {
    if text.trim() == NULL_LIST {
        return Err(malformed_error!(
            "null cannot be assigned to a non-nullable list"
        ));
    }

    read_tokens(text)
}

/// Writes a nullable list, `None` becomes `null`.
pub fn write_nullable_list<T: ScalarText>(values: &Option<Vec<T>>, out: &mut String) {
    match values {
        Some(values) => write_list(values, out),
        None => out.push_str(NULL_LIST),
    }
}

/// Reads a nullable list, `null` becomes `None`.
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] if an element fails to parse.
pub fn read_nullable_list<T: ScalarText>(text: &str) -> Result<Option<Vec<T>>> {
    if text.trim() == NULL_LIST {
        return Ok(None);
    }

    read_tokens(text).map(Some)
}

fn read_tokens<T: ScalarText>(text: &str) -> Result<Vec<T>> {
    text.split(' ')
        .filter(|token| !token.is_empty())
        .map(T::read_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_space_encoding() {
        let mut out = String::new();
        write_list(&vec![1i32, 2, 3], &mut out);
        assert_eq!(out, "1 2 3 ");

        let mut out = String::new();
        write_list::<f64>(&Vec::new(), &mut out);
        assert_eq!(out, "");
    }

    #[test]
    fn null_law() {
        let mut out = String::new();
        write_nullable_list::<i64>(&None, &mut out);
        assert_eq!(out, "null");
        assert_eq!(read_nullable_list::<i64>(&out).unwrap(), None);

        let empty = read_nullable_list::<i64>("").unwrap();
        assert_eq!(empty, Some(Vec::new()));
    }

    #[test]
    fn read_back() {
        assert_eq!(
            read_list::<bool>("true false true ").unwrap(),
            vec![true, false, true]
        );
        assert_eq!(
            read_nullable_list::<String>("a b ").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(read_list::<i32>("1 x ").is_err());
        assert!(read_list::<i32>("null").is_err());
    }
}
