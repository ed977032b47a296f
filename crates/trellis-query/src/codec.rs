//! Query string encoding
//!
//! Query strings use `application/x-www-form-urlencoded`; a key repeated in
//! the string is a multi-valued field. Keys are emitted in sorted order so the
//! same parameters always produce the same URL.

use trellis_types::QueryParams;
use url::form_urlencoded;

/// Decodes a query string, with or without the leading `?`.
///
/// # Examples
///
/// ```
/// use trellis_query::parse_query;
///
/// let params = parse_query("?q=hello+world&tag=a&tag=b");
/// assert_eq!(params.get_str("q"), Some("hello world"));
/// assert_eq!(params.get("tag").unwrap().values(), vec!["a", "b"]);
/// ```
pub fn parse_query(query: &str) -> QueryParams {
	let query = query.strip_prefix('?').unwrap_or(query);
	QueryParams::from_pairs(
		form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
	)
}

/// Encodes parameters into a query string without the leading `?`.
///
/// # Examples
///
/// ```
/// use trellis_query::to_query_string;
/// use trellis_types::QueryParams;
///
/// let params = QueryParams::from_pairs([("q", "a b"), ("page", "2")]);
/// assert_eq!(to_query_string(&params), "page=2&q=a+b");
/// ```
pub fn to_query_string(params: &QueryParams) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in params {
		for v in value.values() {
			serializer.append_pair(key, v);
		}
	}
	serializer.finish()
}

/// Splits a relative URL into path, query (without `?`) and fragment
/// (without `#`).
pub fn split_url(url: &str) -> (&str, &str, &str) {
	let (rest, fragment) = url.split_once('#').unwrap_or((url, ""));
	let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
	(path, query, fragment)
}

/// Joins a path, parameters and fragment back into a relative URL.
///
/// Empty parameters drop the `?` entirely.
pub fn build_url(path: &str, params: &QueryParams, fragment: &str) -> String {
	let query = to_query_string(params);
	let mut url = String::from(path);
	if !query.is_empty() {
		url.push('?');
		url.push_str(&query);
	}
	if !fragment.is_empty() {
		url.push('#');
		url.push_str(fragment);
	}
	url
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use trellis_types::QueryValue;

	#[rstest]
	#[case("", 0)]
	#[case("?", 0)]
	#[case("a=1", 1)]
	#[case("?a=1&b=2", 2)]
	#[case("a=1&a=2", 1)]
	fn test_parse_key_count(#[case] query: &str, #[case] expected: usize) {
		assert_eq!(parse_query(query).len(), expected);
	}

	#[rstest]
	fn test_parse_flag_without_value_is_empty_string() {
		let params = parse_query("archived");
		assert_eq!(params.get("archived"), Some(&QueryValue::One(String::new())));
	}

	#[rstest]
	fn test_parse_decodes_percent_escapes() {
		let params = parse_query("name=J%C3%BCrgen&email=a%40b.dk");
		assert_eq!(params.get_str("name"), Some("Jürgen"));
		assert_eq!(params.get_str("email"), Some("a@b.dk"));
	}

	#[rstest]
	#[case("/users", ("/users", "", ""))]
	#[case("/users?page=2", ("/users", "page=2", ""))]
	#[case("/users?page=2#top", ("/users", "page=2", "top"))]
	#[case("/users#top", ("/users", "", "top"))]
	fn test_split_url(#[case] url: &str, #[case] expected: (&str, &str, &str)) {
		assert_eq!(split_url(url), expected);
	}

	#[rstest]
	fn test_build_url_omits_empty_query() {
		assert_eq!(build_url("/users", &QueryParams::new(), ""), "/users");
		assert_eq!(
			build_url("/users", &QueryParams::from_pairs([("q", "x")]), "list"),
			"/users?q=x#list"
		);
	}

	#[rstest]
	fn test_multi_value_encodes_repeated_keys() {
		let params = QueryParams::from_pairs([("tag", "b"), ("tag", "a")]);
		assert_eq!(to_query_string(&params), "tag=b&tag=a");
	}
}
