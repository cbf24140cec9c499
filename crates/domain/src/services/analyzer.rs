//! URL parameter analysis.
//!
//! Breaks a fully built tracking URL into its structural parts and sorts its
//! query pairs into UTM and non-UTM subsets. Stateless and read-only: malformed
//! input simply yields no analysis.

use url::Url;

use crate::models::{ParsedUrl, QueryParam};

/// Analyzes an absolute URL.
///
/// Returns `None` for an empty string or anything that does not parse as a
/// well-formed absolute URL.
pub fn analyze(url: &str) -> Option<ParsedUrl> {
    if url.is_empty() {
        return None;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "URL did not parse, no analysis available");
            return None;
        }
    };

    let params: Vec<QueryParam> = parsed
        .query_pairs()
        .map(|(k, v)| QueryParam::new(k, v))
        .collect();

    let (utm_params, other_params): (Vec<_>, Vec<_>) =
        params.iter().cloned().partition(QueryParam::is_utm);

    Some(ParsedUrl {
        protocol: parsed.scheme().to_string(),
        hostname: parsed.host_str().unwrap_or_default().to_string(),
        pathname: parsed.path().to_string(),
        params,
        total_length: url.chars().count(),
        utm_params,
        other_params,
    })
}

/// Appends query pairs to a base URL, skipping pairs with an empty key or value.
///
/// Existing query pairs on `base` are kept. Returns `None` when `base` does not
/// parse as an absolute URL.
pub fn compose_url<K, V>(base: &str, params: &[(K, V)]) -> Option<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base.trim()).ok()?;

    let filled: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_ref().trim(), v.as_ref().trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect();

    if !filled.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in filled {
            pairs.append_pair(key, value);
        }
    }

    Some(url.into())
}
