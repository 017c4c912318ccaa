//! Scroll reveal: content cards fade in as they enter the viewport

/// Elements carrying this class are observed
pub const REVEAL_SELECTOR: &str = ".reveal";
/// Class added once an element has been revealed
pub const VISIBLE_CLASS: &str = "visible";
/// Delay between reveals of elements entering in the same batch
pub const STAGGER_MS: u32 = 100;
/// Fraction of the element that must be on screen
pub const THRESHOLD: f64 = 0.1;
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Delay before revealing the `index`-th intersecting entry of a batch
#[inline]
pub fn stagger_delay_ms(index: usize) -> u32 {
    (index as u32).saturating_mul(STAGGER_MS)
}

/// Pair each entry that is intersecting with its reveal delay, counting only
/// intersecting entries toward the stagger
pub fn schedule<T>(entries: impl IntoIterator<Item = (T, bool)>) -> Vec<(T, u32)> {
    entries
        .into_iter()
        .filter(|(_, intersecting)| *intersecting)
        .enumerate()
        .map(|(i, (entry, _))| (entry, stagger_delay_ms(i)))
        .collect()
}

#[cfg(target_arch = "wasm32")]
pub use web::wire;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, Window,
    };

    use super::*;

    fn reveal_later(window: &Window, element: Element, delay_ms: u32) -> Result<(), JsValue> {
        let closure = Closure::once(move || {
            let _ = element.class_list().add_1(VISIBLE_CLASS);
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        )?;
        closure.forget();
        Ok(())
    }

    /// Observe every reveal element; each is revealed once, then unobserved
    pub fn wire(window: &Window, document: &Document) -> Result<(), JsValue> {
        let targets = document.query_selector_all(REVEAL_SELECTOR)?;
        if targets.length() == 0 {
            return Ok(());
        }

        let window_clone = window.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|e| {
                        let intersecting = e.is_intersecting();
                        (e.target(), intersecting)
                    });
                for (element, delay) in schedule(batch) {
                    observer.unobserve(&element);
                    if let Err(e) = reveal_later(&window_clone, element, delay) {
                        log::warn!("Reveal timer failed: {:?}", e);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(THRESHOLD));
        options.set_root_margin(ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        callback.forget();

        for i in 0..targets.length() {
            if let Some(el) = targets.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                observer.observe(&el);
            }
        }
        log::info!("Scroll reveal observing {} elements", targets.length());
        Ok(())
    }
}
