//! Form bodies and response text handling.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// POST parameters, keyed by form field name
pub type FormParams = BTreeMap<String, String>;

/// Encodes parameters as an `application/x-www-form-urlencoded` body.
///
/// Keys and values are percent-encoded individually as UTF-8 and joined with
/// `&`. Spaces become `+`.
pub fn encode_form<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Rejoins a response body line by line, terminating every line with `\r`.
///
/// `\n`, `\r\n` and a lone `\r` all count as line terminators.
pub fn join_response_lines(body: &str) -> String {
    let mut joined = String::with_capacity(body.len() + 1);
    let mut rest = body;
    while !rest.is_empty() {
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        joined.push_str(&rest[..end]);
        joined.push('\r');

        rest = &rest[end..];
        let terminator = if rest.starts_with("\r\n") {
            2
        } else if rest.is_empty() {
            0
        } else {
            1
        };
        rest = &rest[terminator..];
    }
    joined
}
