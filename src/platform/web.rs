//! Browser implementations of the platform traits

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, Window};

use super::{FrameRequest, FrameScheduler, OnReady, ResourceLoader};
use crate::assets::AssetTable;

/// Frame callback shared between the scheduler and whoever installs it
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler.
///
/// The callback slot is filled after the app is built, since the callback
/// itself needs a handle to the app.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::error!("Frame requested before a callback was installed");
            return FrameRequest(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameRequest(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameRequest(0)
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Err(e) = self.window.cancel_animation_frame(request.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Loads images through `HtmlImageElement` and fires once all have loaded
#[derive(Default)]
pub struct WebImageLoader {
    images: Rc<RefCell<Vec<HtmlImageElement>>>,
}

impl WebImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded elements, indexed by `ImageHandle`
    pub fn images(&self) -> Rc<RefCell<Vec<HtmlImageElement>>> {
        self.images.clone()
    }
}

impl ResourceLoader for WebImageLoader {
    fn load(&mut self, urls: &[String], on_ready: OnReady) {
        let remaining = Rc::new(Cell::new(urls.len()));
        let table = AssetTable::from_urls(urls);
        let on_ready = Rc::new(RefCell::new(Some((on_ready, table))));

        if urls.is_empty() {
            if let Some((callback, table)) = on_ready.borrow_mut().take() {
                callback(table);
            }
            return;
        }

        for url in urls {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::error!("Could not create image for {}: {:?}", url, e);
                    return;
                }
            };

            let remaining = remaining.clone();
            let on_ready = on_ready.clone();
            let loaded_url = url.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                remaining.set(remaining.get().saturating_sub(1));
                log::debug!("Loaded {} ({} left)", loaded_url, remaining.get());
                if remaining.get() == 0 {
                    log::info!("All images loaded");
                    if let Some((callback, table)) = on_ready.borrow_mut().take() {
                        callback(table);
                    }
                }
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            img.set_src(url);
            self.images.borrow_mut().push(img);
        }
    }
}
