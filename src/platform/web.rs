//! Browser bindings
//!
//! DOM-backed collaborators for the animator plus the requestAnimationFrame
//! loop and ResizeObserver wiring that drive it.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, ResizeObserver, Window};

use crate::animator::{Animator, BoundsProvider, Frame, PositionSink, TrailRenderer, TrailSink};
use crate::config::ShadowConfig;
use crate::sim::{Bounds, Trail};

/// Container size from `getBoundingClientRect`
pub struct ElementBounds {
    element: Element,
}

impl ElementBounds {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl BoundsProvider for ElementBounds {
    fn bounds(&self) -> Option<Bounds> {
        if !self.element.is_connected() {
            return None;
        }
        let rect = self.element.get_bounding_client_rect();
        Some(Bounds::new(rect.width() as f32, rect.height() as f32))
    }
}

/// Moves the shadow element with a CSS transform
pub struct StyleSink {
    element: HtmlElement,
    /// Last applied edge length (whole pixels)
    applied_size: Option<i32>,
}

impl StyleSink {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            applied_size: None,
        }
    }
}

impl PositionSink for StyleSink {
    fn present(&mut self, frame: &Frame) {
        let style = self.element.style();
        let px = frame.size.round() as i32;
        if self.applied_size != Some(px) {
            let _ = style.set_property("width", &format!("{}px", px));
            let _ = style.set_property("height", &format!("{}px", px));
            self.applied_size = Some(px);
        }
        let _ = style.set_property(
            "transform",
            &format!("translate3d({}px, {}px, 0)", frame.offset.x, frame.offset.y),
        );
    }

    /// Teardown takes the shadow off the page
    fn clear(&mut self) {
        self.element.remove();
        self.applied_size = None;
    }
}

/// Renders trail points into a fixed pool of cloned shadow elements
pub struct DomTrailRenderer {
    container: Element,
    template: HtmlElement,
    class: String,
    pool: Vec<HtmlElement>,
}

impl DomTrailRenderer {
    pub fn new(container: Element, template: HtmlElement, class: &str) -> Self {
        Self {
            container,
            template,
            class: class.to_string(),
            pool: Vec::new(),
        }
    }

    /// Clone one more afterimage element into the container
    fn grow(&mut self) -> Option<HtmlElement> {
        let node = self.template.clone_node().ok()?;
        let el: HtmlElement = node.dyn_into().ok()?;
        let _ = el.class_list().add_1(&self.class);
        let _ = el.set_attribute("aria-hidden", "true");
        self.container.append_child(&el).ok()?;
        self.pool.push(el.clone());
        Some(el)
    }
}

impl TrailRenderer for DomTrailRenderer {
    fn render(&mut self, trail: &Trail) {
        for (i, point) in trail.iter().enumerate() {
            let el = match self.pool.get(i) {
                Some(el) => el.clone(),
                None => match self.grow() {
                    Some(el) => el,
                    None => {
                        log::warn!("Could not create trail element");
                        return;
                    }
                },
            };
            let style = el.style();
            let px = point.size.round() as i32;
            let _ = style.set_property("display", "");
            let _ = style.set_property("width", &format!("{}px", px));
            let _ = style.set_property("height", &format!("{}px", px));
            let _ = style.set_property(
                "transform",
                &format!("translate3d({}px, {}px, 0)", point.pos.x, point.pos.y),
            );
            let _ = style.set_property("opacity", &format!("{:.3}", trail.opacity(point)));
        }

        for el in self.pool.iter().skip(trail.len()) {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn clear(&mut self) {
        for el in self.pool.drain(..) {
            el.remove();
        }
    }
}

type WebSink = (StyleSink, Option<TrailSink<DomTrailRenderer>>);
type WebAnimator = Animator<ElementBounds, WebSink, Pcg32>;

struct Shared {
    animator: WebAnimator,
    /// Pending requestAnimationFrame id
    frame_id: Option<i32>,
    stopped: bool,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running shadow. Dropping the handle stops it.
pub struct ShadowHandle {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    frame_cb: FrameCallback,
    observer: Option<ResizeObserver>,
    resize_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

impl ShadowHandle {
    /// Cancel the pending frame and stop observing the container.
    ///
    /// Repeated calls are no-ops.
    pub fn stop(&mut self) {
        {
            let mut s = self.shared.borrow_mut();
            if s.stopped {
                return;
            }
            s.stopped = true;
            if let Some(id) = s.frame_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            s.animator.stop();
        }

        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.resize_cb = None;
        // Breaks the closure's self-reference
        self.frame_cb.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        !self.shared.borrow().stopped
    }
}

impl Drop for ShadowHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resolve the container, falling back to `<body>`
pub fn find_container(document: &Document, selector: &str) -> Option<Element> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .or_else(|| document.body().map(Element::from))
}

/// Create the shadow element inside `container`
pub fn create_shadow_element(
    document: &Document,
    container: &Element,
    class: &str,
) -> Option<HtmlElement> {
    let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    el.set_class_name(class);
    let _ = el.set_attribute("aria-hidden", "true");
    container.append_child(&el).ok()?;
    Some(el)
}

/// Start bouncing `shadow` inside `container`.
///
/// Returns `None` when the config is invalid or the container is detached.
pub fn start(
    container: &Element,
    shadow: &HtmlElement,
    config: ShadowConfig,
    seed: u64,
) -> Option<ShadowHandle> {
    let window = web_sys::window()?;

    let trail = config.trail.enabled.then(|| {
        TrailSink::new(
            config.trail.capacity,
            config.trail.ttl_secs,
            DomTrailRenderer::new(container.clone(), shadow.clone(), &config.trail_class),
        )
    });
    let sink = (StyleSink::new(shadow.clone()), trail);

    let mut animator = match Animator::new(
        config,
        ElementBounds::new(container.clone()),
        sink,
        Pcg32::seed_from_u64(seed),
    ) {
        Ok(a) => a,
        Err(e) => {
            log::warn!("Shadow not started: {}", e);
            return None;
        }
    };
    if !animator.start() {
        return None;
    }

    let shared = Rc::new(RefCell::new(Shared {
        animator,
        frame_id: None,
        stopped: false,
    }));

    // Recurring frame callback, rescheduling itself until stopped
    let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
    {
        let shared = shared.clone();
        let frame_ref = frame_cb.clone();
        let window = window.clone();
        *frame_cb.borrow_mut() = Some(Closure::new(move |now: f64| {
            let mut s = shared.borrow_mut();
            s.frame_id = None;
            if s.stopped {
                return;
            }
            s.animator.frame(now);
            if let Some(cb) = frame_ref.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => s.frame_id = Some(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }));
    }

    if let Some(cb) = frame_cb.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => shared.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    // Container resize notifications
    let resize_cb = {
        let shared = shared.clone();
        Closure::<dyn FnMut(_)>::new(move |_entries: js_sys::Array| {
            let Ok(mut s) = shared.try_borrow_mut() else {
                return;
            };
            if !s.stopped {
                s.animator.on_resize();
            }
        })
    };
    let observer = match ResizeObserver::new(resize_cb.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(container);
            Some(observer)
        }
        Err(e) => {
            log::warn!("ResizeObserver unavailable, bounds fixed at start: {:?}", e);
            None
        }
    };

    Some(ShadowHandle {
        window,
        shared,
        frame_cb,
        observer,
        resize_cb: Some(resize_cb),
    })
}
