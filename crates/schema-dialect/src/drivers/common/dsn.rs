//! Key=value connection-string helpers.
//!
//! Clauses are split on a delimiter, trimmed and split on the first `=`.
//! Keys are lower-cased so lookups are case-insensitive.

use url::Url;

/// Parsed `key=value` clauses in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    pairs: Vec<(String, String)>,
}

impl KeyValues {
    /// Split on `;` (ADO / ODBC style).
    pub fn semicolon_separated(source: &str) -> Self {
        Self::from_clauses(source.split(';'))
    }

    /// Split on whitespace (libpq style). Values may be single-quoted.
    pub fn whitespace_separated(source: &str) -> Self {
        Self::from_clauses(source.split_whitespace())
    }

    fn from_clauses<'a>(clauses: impl Iterator<Item = &'a str>) -> Self {
        let pairs = clauses
            .filter_map(|clause| {
                let (key, value) = clause.trim().split_once('=')?;
                let value = value.trim();
                let value = value
                    .strip_prefix('\'')
                    .and_then(|v| v.strip_suffix('\''))
                    .unwrap_or(value);
                Some((key.trim().to_lowercase(), value.to_string()))
            })
            .collect();
        Self { pairs }
    }

    /// First non-empty value among `keys`, in key priority order.
    pub fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|wanted| {
            self.pairs
                .iter()
                .find(|(key, value)| key == wanted && !value.is_empty())
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Whether the connection string is a URL with one of the given schemes.
pub fn has_scheme(source: &str, schemes: &[&str]) -> bool {
    source
        .trim()
        .split_once("://")
        .is_some_and(|(scheme, _)| schemes.iter().any(|s| scheme.eq_ignore_ascii_case(s)))
}

/// First non-empty query parameter among `keys`, matched case-insensitively.
pub fn query_param(url: &Url, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|wanted| {
        url.query_pairs()
            .find(|(key, value)| key.eq_ignore_ascii_case(wanted) && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })
}

/// Non-empty host of a URL.
pub fn url_host(url: &Url) -> Option<String> {
    url.host_str().filter(|h| !h.is_empty()).map(str::to_string)
}

/// Non-empty user of a URL.
pub fn url_user(url: &Url) -> Option<String> {
    Some(url.username()).filter(|u| !u.is_empty()).map(str::to_string)
}

/// First path segment of a URL, used as the database name.
pub fn url_database(url: &Url) -> Option<String> {
    url.path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|db| !db.is_empty())
        .map(str::to_string)
}
