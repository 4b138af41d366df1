use toc_highlight_config::TocConfig;
use toc_highlight_engine::{HeadingMark, NavLink, TocDom};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::{WebError, describe};

/// [`TocDom`] over the live browser document.
pub struct WebDom {
    window: Window,
    document: Document,
    link_selector: String,
    heading_selector: String,
    active_class: String,
}

impl WebDom {
    pub fn new(window: Window, config: &TocConfig) -> Result<Self, WebError> {
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self {
            window,
            document,
            link_selector: config.link_selector(),
            heading_selector: config.heading_selector.clone(),
            active_class: config.active_class.clone(),
        })
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(nodes) => (0..nodes.length())
                .filter_map(|idx| nodes.item(idx))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                log::warn!("selector {selector:?} rejected: {}", describe(&err));
                Vec::new()
            }
        }
    }
}

impl TocDom for WebDom {
    type Element = Element;

    fn query_links(&self) -> Vec<NavLink<Element>> {
        self.select_all(&self.link_selector)
            .into_iter()
            .map(|element| {
                let href = element.get_attribute("href").unwrap_or_default();
                NavLink::new(element, href)
            })
            .collect()
    }

    fn query_headings(&self) -> Vec<HeadingMark> {
        let scroll = self.scroll_offset();
        self.select_all(&self.heading_selector)
            .iter()
            .map(|element| {
                HeadingMark::new(&element.id(), element.get_bounding_client_rect().top() + scroll)
            })
            .collect()
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn set_active(&mut self, link: &NavLink<Element>) {
        if let Err(err) = link.element.class_list().add_1(&self.active_class) {
            log::warn!("could not mark {:?} active: {}", link.href, describe(&err));
        }
    }

    fn clear_active(&mut self, links: &[NavLink<Element>]) {
        for link in links {
            if let Err(err) = link.element.class_list().remove_1(&self.active_class) {
                log::warn!("could not clear {:?}: {}", link.href, describe(&err));
            }
        }
    }
}
