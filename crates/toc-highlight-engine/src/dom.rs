//! The slice of the document the sync logic is allowed to touch.
//!
//! Everything the controller reads or writes goes through [`TocDom`], so the
//! browser binding and the test fakes are interchangeable.

/// A TOC anchor together with the `href` it carried when discovered.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink<E> {
    /// Host handle used to toggle the active class.
    pub element: E,
    /// Raw `href` attribute; empty when the anchor has none.
    pub href: String,
}

impl<E> NavLink<E> {
    pub fn new(element: E, href: impl Into<String>) -> Self {
        Self {
            element,
            href: href.into(),
        }
    }
}

/// A heading with an `id`, positioned relative to the top of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingMark {
    /// `#` followed by the heading's id.
    pub fragment: String,
    /// Distance from the document top to the heading's top edge, in px.
    pub top: f64,
}

impl HeadingMark {
    pub fn new(id: &str, top: f64) -> Self {
        Self {
            fragment: format!("#{id}"),
            top,
        }
    }
}

/// DOM capabilities used by [`crate::TocSync`].
///
/// Reads are best-effort: implementations return empty values rather than
/// failing, and swallow (and log) errors from class mutation.
pub trait TocDom {
    type Element: Clone;

    /// Anchors inside any TOC container, in document order.
    fn query_links(&self) -> Vec<NavLink<Self::Element>>;

    /// Section headings in document order with fresh offsets.
    fn query_headings(&self) -> Vec<HeadingMark>;

    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;

    /// Fragment part of the current location including the `#`, or empty.
    fn location_hash(&self) -> String;

    fn set_active(&mut self, link: &NavLink<Self::Element>);

    /// Remove the active marker from every link. Must be idempotent.
    fn clear_active(&mut self, links: &[NavLink<Self::Element>]);
}
