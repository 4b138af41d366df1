//! Resolving a fragment identifier to the TOC link that points at it.
//!
//! Links are scanned in document order and the first one satisfying any of
//! these rules wins:
//!
//! 1. `href` equals the fragment.
//! 2. `href` equals the fragment with a leading `/#` rewritten to `#`.
//! 3. `href` ends with the fragment.
//! 4. The percent-decoded `href` equals the fragment.
//!
//! Document order outranks rule order, so `guide.html#setup` listed before
//! `#setup` claims `#setup` through rule 3. Rule 3 is a raw suffix test: it
//! lets `page.html#setup` match `#setup`, but it equally lets a link to
//! `#setup` on some other page claim the fragment. That looseness is a known
//! heuristic limit, not something callers should rely on.

use std::borrow::Cow;

use crate::dom::NavLink;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    #[error("Malformed percent escape at byte {0}")]
    MalformedEscape(usize),
    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Percent-decode with the strictness of `decodeURIComponent`: a `%` must be
/// followed by two hex digits and the result must be UTF-8.
pub fn decode_fragment(raw: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = raw.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let well_formed = bytes
                .get(idx + 1..idx + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return Err(DecodeError::MalformedEscape(idx));
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }

    urlencoding::decode(raw).map_err(|_| DecodeError::InvalidUtf8)
}

/// Find the link that best corresponds to `fragment`.
///
/// Returns `None` for an empty fragment or when no rule matches.
pub fn match_link_for_id<'a, E>(links: &'a [NavLink<E>], fragment: &str) -> Option<&'a NavLink<E>> {
    if fragment.is_empty() {
        return None;
    }

    let normalized = normalize_root_fragment(fragment);

    links.iter().find(|link| {
        link.href == fragment
            || link.href == normalized
            || link.href.ends_with(fragment)
            || decoded_equals(&link.href, fragment)
    })
}

fn normalize_root_fragment(fragment: &str) -> Cow<'_, str> {
    match fragment.strip_prefix("/#") {
        Some(rest) => Cow::Owned(format!("#{rest}")),
        None => Cow::Borrowed(fragment),
    }
}

fn decoded_equals(href: &str, fragment: &str) -> bool {
    match decode_fragment(href) {
        Ok(decoded) => decoded == fragment,
        Err(err) => {
            log::trace!("skipping href {href:?}: {err}");
            false
        }
    }
}
