//! Path parameters and typed extraction.
//!
//! [`Params`] keeps parameters in the order they appear in the pattern, so
//! tuple extraction through [`FromParams`] works by index.
//!
//! # Example
//!
//! ```
//! use waymark_urls::{FromParams, Params};
//!
//! let params: Params = [("user_id", "42"), ("slug", "hello")].into_iter().collect();
//!
//! let (user_id, slug) = <(i64, String)>::from_params(&params).unwrap();
//! assert_eq!(user_id, 42);
//! assert_eq!(slug, "hello");
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParamError;

/// Ordered map from parameter names to decoded string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	entries: Vec<(String, String)>,
}

impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a parameter, replacing the value of an existing name in place.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Returns the value for a name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value.as_str())
	}

	/// Returns whether a name is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Parses a single named parameter into `T`.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Missing`] if the name is absent and
	/// [`ParamError::Parse`] if the value does not parse.
	pub fn parse<T>(&self, name: &str) -> Result<T, ParamError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| ParamError::Missing(name.to_string()))?;
		raw.parse::<T>().map_err(|e| ParamError::Parse {
			param_index: None,
			param_name: Some(name.to_string()),
			param_type: std::any::type_name::<T>(),
			raw_value: raw.to_string(),
			source_message: e.to_string(),
		})
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(name, value)` pairs in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Iterates over the values in pattern order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(_, value)| value.as_str())
	}

	/// Converts into an unordered map.
	pub fn into_map(self) -> HashMap<String, String> {
		self.entries.into_iter().collect()
	}
}

impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Params::new();
		for (name, value) in iter {
			params.insert(name, value);
		}
		params
	}
}

/// Trait for extracting typed values from path parameters.
///
/// Implemented for common primitives (single parameter) and for tuples of
/// up to six `FromStr` types (parameters in pattern order).
pub trait FromParams: Sized {
	/// Extracts `Self` from the parameters.
	///
	/// # Errors
	///
	/// Returns [`ParamError::CountMismatch`] if the number of parameters doesn't match.
	/// Returns [`ParamError::Parse`] if parameter parsing fails.
	fn from_params(params: &Params) -> Result<Self, ParamError>;
}

fn parse_at<T>(params: &Params, index: usize) -> Result<T, ParamError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	let (name, raw) = params
		.entries
		.get(index)
		.ok_or(ParamError::CountMismatch {
			expected: index + 1,
			actual: params.len(),
		})?;
	raw.parse::<T>().map_err(|e| ParamError::Parse {
		param_index: Some(index),
		param_name: Some(name.clone()),
		param_type: std::any::type_name::<T>(),
		raw_value: raw.clone(),
		source_message: e.to_string(),
	})
}

fn expect_count(params: &Params, expected: usize) -> Result<(), ParamError> {
	if params.len() != expected {
		return Err(ParamError::CountMismatch {
			expected,
			actual: params.len(),
		});
	}
	Ok(())
}

macro_rules! impl_from_params_for_primitive {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromParams for $ty {
				fn from_params(params: &Params) -> Result<Self, ParamError> {
					expect_count(params, 1)?;
					parse_at(params, 0)
				}
			}
		)*
	};
}

impl_from_params_for_primitive!(i32, i64, u32, u64, usize, bool, String);

macro_rules! impl_from_params_for_tuple {
	($count:expr; $($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromParams for ($($ty,)+)
		where
			$($ty: FromStr,)+
			$(<$ty as FromStr>::Err: std::fmt::Display,)+
		{
			fn from_params(params: &Params) -> Result<Self, ParamError> {
				expect_count(params, $count)?;
				Ok(($(parse_at::<$ty>(params, $idx)?,)+))
			}
		}
	};
}

impl_from_params_for_tuple!(2; 0 => A, 1 => B);
impl_from_params_for_tuple!(3; 0 => A, 1 => B, 2 => C);
impl_from_params_for_tuple!(4; 0 => A, 1 => B, 2 => C, 3 => D);
impl_from_params_for_tuple!(5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_from_params_for_tuple!(6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn params(values: &[(&str, &str)]) -> Params {
		values.iter().copied().collect()
	}

	#[rstest]
	fn test_insert_replaces_in_place() {
		let mut p = params(&[("a", "1"), ("b", "2")]);
		p.insert("a", "3");

		let pairs: Vec<(&str, &str)> = p.iter().collect();
		assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
	}

	#[rstest]
	fn test_parse_named() {
		let p = params(&[("id", "42")]);
		assert_eq!(p.parse::<u32>("id").unwrap(), 42);
		assert!(matches!(p.parse::<u32>("missing"), Err(ParamError::Missing(_))));
	}

	#[rstest]
	fn test_parse_named_error_carries_name() {
		let p = params(&[("id", "abc")]);
		match p.parse::<i64>("id") {
			Err(ParamError::Parse {
				param_name,
				raw_value,
				..
			}) => {
				assert_eq!(param_name.as_deref(), Some("id"));
				assert_eq!(raw_value, "abc");
			}
			other => panic!("Expected ParseError, got {:?}", other),
		}
	}

	#[rstest]
	#[case("42", 42)]
	#[case("-7", -7)]
	fn test_from_params_i32(#[case] raw: &str, #[case] expected: i32) {
		let p = params(&[("id", raw)]);
		assert_eq!(i32::from_params(&p).unwrap(), expected);
	}

	#[rstest]
	fn test_from_params_bool_and_string() {
		assert!(bool::from_params(&params(&[("flag", "true")])).unwrap());
		assert_eq!(
			String::from_params(&params(&[("slug", "hello")])).unwrap(),
			"hello"
		);
	}

	#[rstest]
	fn test_from_params_count_mismatch() {
		let p = params(&[("a", "1"), ("b", "2")]);
		match i32::from_params(&p) {
			Err(ParamError::CountMismatch { expected, actual }) => {
				assert_eq!(expected, 1);
				assert_eq!(actual, 2);
			}
			other => panic!("Expected CountMismatch, got {:?}", other),
		}
	}

	#[rstest]
	fn test_from_params_tuple_mixed_types() {
		let p = params(&[("a", "123"), ("b", "456"), ("c", "test"), ("d", "true")]);
		let (a, b, c, d) = <(i64, u64, String, bool)>::from_params(&p).unwrap();
		assert_eq!(a, 123);
		assert_eq!(b, 456);
		assert_eq!(c, "test");
		assert!(d);
	}

	#[rstest]
	fn test_from_params_tuple_parse_error_index() {
		let p = params(&[("a", "not_a_number"), ("b", "hello")]);
		match <(i32, String)>::from_params(&p) {
			Err(ParamError::Parse {
				param_index,
				raw_value,
				..
			}) => {
				assert_eq!(param_index, Some(0));
				assert_eq!(raw_value, "not_a_number");
			}
			other => panic!("Expected ParseError, got {:?}", other),
		}
	}

	#[rstest]
	fn test_from_params_tuple_6_elements() {
		let p = params(&[
			("a", "1"),
			("b", "2"),
			("c", "3"),
			("d", "4"),
			("e", "5"),
			("f", "6"),
		]);
		let values = <(i32, i32, i32, i32, i32, i32)>::from_params(&p).unwrap();
		assert_eq!(values, (1, 2, 3, 4, 5, 6));
	}

	#[rstest]
	fn test_into_map() {
		let map = params(&[("a", "1")]).into_map();
		assert_eq!(map.get("a"), Some(&"1".to_string()));
	}
}
