//! Navigation bar: scrolled state, mobile menu toggle, smooth anchor scroll

/// Scroll offset (px) past which the bar switches to its "scrolled" look
pub const SCROLLED_THRESHOLD: f64 = 50.0;
/// Fixed header height subtracted from anchor targets
pub const HEADER_OFFSET: f64 = 80.0;

pub const NAVBAR_ID: &str = "navbar";
pub const TOGGLE_ID: &str = "nav-toggle";
pub const LINKS_ID: &str = "nav-links";

#[inline]
pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// Document offset to scroll to so `element_top` (viewport-relative) lands
/// just under the header
#[inline]
pub fn scroll_target(element_top: f64, scroll_y: f64) -> f64 {
    (element_top + scroll_y - HEADER_OFFSET).max(0.0)
}

/// Target element id of an in-page link, if it names one
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Mobile menu open/closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    pub open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::wire;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

    use super::*;

    fn apply_menu(document: &Document, menu: NavMenu) {
        if let Some(links) = document.get_element_by_id(LINKS_ID) {
            let _ = links.class_list().toggle_with_force("open", menu.open);
        }
        if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
            let _ = toggle.class_list().toggle_with_force("active", menu.open);
        }
    }

    /// Hook up scroll, menu toggle and anchor handlers. Missing elements are
    /// skipped; the page works without a nav bar.
    pub fn wire(window: &Window, document: &Document) -> Result<(), JsValue> {
        let menu = Rc::new(RefCell::new(NavMenu::default()));

        if let Some(navbar) = document.get_element_by_id(NAVBAR_ID) {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
                let _ = navbar
                    .class_list()
                    .toggle_with_force("scrolled", is_scrolled(scroll_y));
            });
            window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
            let menu = menu.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut m = menu.borrow_mut();
                m.toggle();
                apply_menu(&document_clone, *m);
            });
            toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let anchors = document.query_selector_all("a[href^='#']")?;
        for i in 0..anchors.length() {
            let Some(anchor) = anchors.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let menu = menu.clone();
            let window_clone = window.clone();
            let document_clone = document.clone();
            let anchor_clone = anchor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let href = anchor_clone.get_attribute("href").unwrap_or_default();
                let Some(target) = anchor_id(&href).and_then(|id| document_clone.get_element_by_id(id))
                else {
                    return;
                };
                event.prevent_default();

                let top = target.get_bounding_client_rect().top();
                let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
                let options = ScrollToOptions::new();
                options.set_top(scroll_target(top, scroll_y));
                options.set_behavior(ScrollBehavior::Smooth);
                window_clone.scroll_to_with_scroll_to_options(&options);

                let mut m = menu.borrow_mut();
                m.close();
                apply_menu(&document_clone, *m);
            });
            anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        log::info!("Navigation wired ({} anchors)", anchors.length());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolled_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }

    #[test]
    fn test_scroll_target_offsets_header() {
        assert_eq!(scroll_target(500.0, 200.0), 620.0);
        assert_eq!(scroll_target(20.0, 0.0), 0.0, "never above the page top");
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("#about"), Some("about"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("/elsewhere"), None);
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = NavMenu::default();
        assert!(menu.toggle());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.open);
    }
}
