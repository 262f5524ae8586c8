//! Browser binding: DOM listeners feeding the engine, exposed to JavaScript as [`PixelCanvas`].
//!
//! Listener lifetimes follow the interaction model:
//!
//! - mount listeners (window `resize`, document `keydown`/`keyup`, canvas
//!   `wheel`/`mousedown`) live as long as the [`PixelCanvas`];
//! - window `mousemove`/`mouseup` are a [`WindowCapture`] acquired when the
//!   engine reports [`Action::BeginCapture`] and released on
//!   [`Action::EndCapture`] or when the canvas is dropped.
//!
//! Callbacks hold only a `Weak` handle to the shared state, so dropping the
//! `PixelCanvas` tears everything down even while a capture is active.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    MouseEvent, WheelEvent,
};

use crate::camera::Point;
use crate::config::CanvasConfig;
use crate::consts::EXPORT_FILE_NAME;
use crate::engine::{Action, Engine};
use crate::input::{Button, Key, WheelDelta};

type Callback = Closure<dyn FnMut(Event)>;

/// One attached DOM listener; detached when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Callback,
    attached: bool,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, callback: Callback) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback, attached: true })
    }

    /// Attach with `passive: false` so the handler may cancel native scrolling.
    fn attach_active(target: &EventTarget, event: &'static str, callback: Callback) -> Result<Self, JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback, attached: true })
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event = self.event, ?err, "failed to remove listener");
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Window-level `mousemove` + `mouseup` subscription for one press.
struct WindowCapture {
    listeners: Vec<Listener>,
}

impl WindowCapture {
    fn acquire(window: &EventTarget, shared: &Rc<Shared>) -> Result<Self, JsValue> {
        let on_move = handler(shared, |shared, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return Vec::new();
            };
            let point = shared.engine.borrow().surface_point(event);
            shared.engine.borrow_mut().core.on_pointer_move(point)
        });
        let on_up = handler(shared, |shared, _event| shared.engine.borrow_mut().core.on_pointer_up());

        Ok(Self {
            listeners: vec![Listener::attach(window, "mousemove", on_move)?, Listener::attach(window, "mouseup", on_up)?],
        })
    }

    fn release(&mut self) {
        for listener in &mut self.listeners {
            listener.detach();
        }
    }
}

struct Shared {
    engine: RefCell<Engine>,
    capture: RefCell<Option<WindowCapture>>,
    /// Released capture whose closures may still be on the call stack; dropped on the next acquire.
    retired: RefCell<Option<WindowCapture>>,
}

/// Wrap an engine handler as a DOM callback that applies the returned actions.
fn handler(shared: &Rc<Shared>, f: impl Fn(&Rc<Shared>, &Event) -> Vec<Action> + 'static) -> Callback {
    let weak: Weak<Shared> = Rc::downgrade(shared);
    Closure::wrap(Box::new(move |event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let actions = f(&shared, &event);
        apply(&shared, actions);
    }) as Box<dyn FnMut(Event)>)
}

fn apply(shared: &Rc<Shared>, actions: Vec<Action>) {
    let mut render = false;
    for action in actions {
        match action {
            Action::RenderNeeded => render = true,
            Action::SetCursor(cursor) => shared.engine.borrow().set_cursor(cursor),
            Action::BeginCapture => begin_capture(shared),
            Action::EndCapture => end_capture(shared),
        }
    }
    if render {
        shared.engine.borrow().render();
    }
}

fn begin_capture(shared: &Rc<Shared>) {
    shared.retired.borrow_mut().take();
    if shared.capture.borrow().is_some() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    match WindowCapture::acquire(&window, shared) {
        Ok(capture) => {
            tracing::debug!("window capture acquired");
            *shared.capture.borrow_mut() = Some(capture);
        }
        Err(err) => tracing::warn!(?err, "failed to capture window mouse events"),
    }
}

fn end_capture(shared: &Rc<Shared>) {
    let Some(mut capture) = shared.capture.borrow_mut().take() else {
        return;
    };
    capture.release();
    tracing::debug!("window capture released");
    *shared.retired.borrow_mut() = Some(capture);
}

/// A pixel-art canvas mounted on a `<canvas>` inside a sized container.
#[wasm_bindgen]
pub struct PixelCanvas {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PixelCanvas {
    /// Mount on `canvas`, sizing it from `container`, with the default 900x600 / 10 px grid.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if a listener cannot be attached or no window is available.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, container: HtmlElement) -> Result<PixelCanvas, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let shared = Rc::new(Shared {
            engine: RefCell::new(Engine::new(canvas.clone(), container, CanvasConfig::default())),
            capture: RefCell::new(None),
            retired: RefCell::new(None),
        });

        let on_resize = handler(&shared, |shared, _event| shared.engine.borrow_mut().resize_to_container());
        let on_key_down = handler(&shared, |shared, event| {
            let Some(key) = grab_key(event) else {
                return Vec::new();
            };
            shared.engine.borrow_mut().core.on_key_down(&key)
        });
        let on_key_up = handler(&shared, |shared, event| {
            let Some(key) = grab_key(event) else {
                return Vec::new();
            };
            shared.engine.borrow_mut().core.on_key_up(&key)
        });
        let on_wheel = handler(&shared, |shared, event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return Vec::new();
            };
            event.prevent_default();
            let point = shared.engine.borrow().surface_point(event);
            let delta = WheelDelta { dy: event.delta_y() };
            shared.engine.borrow_mut().core.on_wheel(point, delta)
        });
        let on_mouse_down = handler(&shared, |shared, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return Vec::new();
            };
            event.prevent_default();
            let point: Point = shared.engine.borrow().surface_point(event);
            shared.engine.borrow_mut().core.on_pointer_down(point, Button::from_dom(event.button()))
        });

        let listeners = vec![
            Listener::attach(&window, "resize", on_resize)?,
            Listener::attach(&document, "keydown", on_key_down)?,
            Listener::attach(&document, "keyup", on_key_up)?,
            Listener::attach_active(&canvas, "wheel", on_wheel)?,
            Listener::attach(&canvas, "mousedown", on_mouse_down)?,
        ];

        let actions = shared.engine.borrow_mut().resize_to_container();
        apply(&shared, actions);
        tracing::debug!("pixel canvas mounted");
        Ok(Self { shared, listeners })
    }

    /// Apply new dimensions; a change clears the drawing and refits.
    ///
    /// # Errors
    ///
    /// Rejects zero dimensions; the previous dimensions stay active.
    pub fn configure(&mut self, width: u32, height: u32, cell_size: u32) -> Result<(), JsValue> {
        let result = self.shared.engine.borrow_mut().core.configure(width, height, cell_size);
        let actions = result.map_err(|err| js_error(&err.to_string()))?;
        if !actions.is_empty() {
            let refit = self.shared.engine.borrow_mut().resize_to_container();
            apply(&self.shared, refit);
        }
        Ok(())
    }

    /// Select the paint color. Returns `false` and keeps the old color if `color` is malformed.
    pub fn set_color(&mut self, color: &str) -> bool {
        match self.shared.engine.borrow_mut().core.set_color(color) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "color rejected");
                false
            }
        }
    }

    /// The currently selected paint color.
    pub fn color(&self) -> String {
        self.shared.engine.borrow().core.color().to_string()
    }

    /// Clear the drawing and restore the initial fit.
    pub fn reset(&mut self) {
        let actions = self.shared.engine.borrow_mut().reset();
        apply(&self.shared, actions);
    }

    pub fn fit_to_view(&mut self) {
        let actions = self.shared.engine.borrow_mut().core.fit_to_view();
        apply(&self.shared, actions);
    }

    /// Number of painted cells.
    pub fn painted_cells(&self) -> usize {
        self.shared.engine.borrow().core.buffer().len()
    }

    /// The drawing as a PNG data URL, or `undefined` if unavailable.
    pub fn export_data_url(&self) -> Option<String> {
        self.shared.engine.borrow().export_data_url()
    }

    /// Trigger a browser download of the drawing. Returns whether one was started.
    pub fn download(&self) -> bool {
        let Some(url) = self.export_data_url() else {
            return false;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return false;
        };
        let anchor = match document.create_element("a").map(|el| el.dyn_into::<HtmlAnchorElement>()) {
            Ok(Ok(anchor)) => anchor,
            _ => return false,
        };
        anchor.set_href(&url);
        anchor.set_download(EXPORT_FILE_NAME);
        anchor.click();
        true
    }
}

impl Drop for PixelCanvas {
    fn drop(&mut self) {
        for listener in &mut self.listeners {
            listener.detach();
        }
        end_capture(&self.shared);
        self.shared.retired.borrow_mut().take();
        tracing::debug!("pixel canvas unmounted");
    }
}

/// A JavaScript `Error` carrying `message`.
fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// The grab key from a keyboard event, with its default action suppressed.
fn grab_key(event: &Event) -> Option<Key> {
    let event = event.dyn_ref::<KeyboardEvent>()?;
    let key = Key(event.code());
    if !key.is_grab() {
        return None;
    }
    event.prevent_default();
    Some(key)
}
