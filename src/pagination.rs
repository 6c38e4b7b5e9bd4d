//! Cursor pagination driven by the `Link` response header.
//!
//! Sentry paginates list endpoints with opaque cursors. Each page advertises
//! its neighbours in a `Link` header such as:
//!
//! ```text
//! <https://sentry.io/api/0/organizations/acme/members/?&cursor=100:-1:1>; rel="previous"; results="false"; cursor="100:-1:1",
//! <https://sentry.io/api/0/organizations/acme/members/?&cursor=100:1:0>; rel="next"; results="true"; cursor="100:1:0"
//! ```
//!
//! Only a `next` relation whose `results` attribute is `"true"` yields a
//! continuation cursor. Anything else means the listing is complete.
//!
//! ```no_run
//! use sentry_api::{Client, ListCursorParams};
//!
//! # async fn example() -> Result<(), sentry_api::Error> {
//! let client = Client::builder().build()?;
//! let mut params = ListCursorParams::default();
//! loop {
//!     let page = client.organizations().list(&params).await?;
//!     for org in page.iter() {
//!         println!("{:?}", org.slug);
//!     }
//!     if !page.has_next_page() {
//!         break;
//!     }
//!     params.cursor = Some(page.cursor.clone());
//! }
//! # Ok(())
//! # }
//! ```

use crate::request::Request;
use http::HeaderMap;
use std::collections::HashMap;

/// Query parameters shared by every cursor-paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCursorParams {
    /// A cursor, as given in the `Link` header of a previous page.
    ///
    /// Omitted from the query string when `None` or empty.
    pub cursor: Option<String>,
}

impl ListCursorParams {
    /// Creates parameters that resume a listing at `cursor`.
    pub fn with_cursor(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
        }
    }

    pub(crate) fn apply(&self, request: Request) -> Request {
        request.with_query_param("cursor", self.cursor.as_deref().unwrap_or_default())
    }
}

/// One relation parsed out of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    /// The target URI between the angle brackets.
    pub uri: String,
    /// The `rel` attribute.
    pub rel: String,
    /// Every other attribute, unquoted.
    pub params: HashMap<String, String>,
}

/// Parses every `Link` header value into its relations.
///
/// Malformed entries are skipped.
pub fn parse_link_header(headers: &HeaderMap) -> Vec<LinkRelation> {
    headers
        .get_all(http::header::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| split_outside_quotes(value, ','))
        .filter_map(parse_link_value)
        .collect()
}

/// Extracts the continuation cursor from a response's `Link` header.
///
/// Returns an empty string when there is no `next` relation or when its
/// `results` attribute is anything other than `"true"`.
pub fn next_cursor(headers: &HeaderMap) -> String {
    parse_link_header(headers)
        .into_iter()
        .find(|link| link.rel.eq_ignore_ascii_case("next"))
        .filter(|link| link.params.get("results").map(String::as_str) == Some("true"))
        .and_then(|mut link| link.params.remove("cursor"))
        .unwrap_or_default()
}

fn parse_link_value(entry: &str) -> Option<LinkRelation> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let end = rest.find('>')?;
    let uri = rest[..end].to_string();

    let mut rel = None;
    let mut params = HashMap::new();
    for attribute in split_outside_quotes(&rest[end + 1..], ';') {
        let Some((key, value)) = attribute.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().trim_matches('"').to_string();
        if key == "rel" {
            rel = Some(value);
        } else {
            params.insert(key, value);
        }
    }

    Some(LinkRelation {
        uri,
        rel: rel?,
        params,
    })
}

/// Splits on `separator`, ignoring separators inside quotes or angle brackets.
fn split_outside_quotes(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut in_uri = false;
    let mut start = 0;

    for (index, c) in input.char_indices() {
        match c {
            '"' if !in_uri => in_quotes = !in_quotes,
            '<' if !in_quotes => in_uri = true,
            '>' if !in_quotes => in_uri = false,
            c if c == separator && !in_quotes && !in_uri => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts.into_iter().filter(|part| !part.trim().is_empty()).collect()
}
