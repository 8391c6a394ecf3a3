//! `PlateView` - the WASM-exported entry point for the plate widget.
//!
//! This module owns the browser side of a plate:
//! - Creating the four layer canvases and stacking them in the parent
//! - Observing the parent with a `ResizeObserver`
//! - Routing mouse events into the model's pointer handlers
//! - Forwarding state snapshots to JavaScript subscribers
//!
//! Every listener is registered through the model's `ReactiveModel`, so a
//! single `dispose()` detaches the canvases and removes all of them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, MouseEvent, ResizeObserver};

use crate::error::{PlateError, Result as PlateResult};
use crate::plate::PlateModel;
use crate::reactive::{Behavior, Lifecycle, Subscription};
use crate::render::{CanvasLayer, Layer, LayerSet};
use crate::types::{Dimensions, PlateConfig, PlateState, PlateUpdate};

type DeferredOp = Box<dyn FnOnce(&mut PlateModel<CanvasLayer>)>;

/// Install the panic hook and console logger. Safe to call repeatedly.
fn init_runtime() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// The model plus the exclusive operations (dispose, subscription
/// bookkeeping) requested while it was borrowed.
///
/// Event handlers and updates only need shared access, so JS subscribers
/// notified from inside them may call `update()` directly. Anything needing
/// `&mut` is queued and runs once the outermost borrow is released.
struct ViewCore {
    model: RefCell<PlateModel<CanvasLayer>>,
    deferred: RefCell<Vec<DeferredOp>>,
}

impl ViewCore {
    fn new(model: PlateModel<CanvasLayer>) -> Self {
        Self {
            model: RefCell::new(model),
            deferred: RefCell::new(Vec::new()),
        }
    }

    /// Run `f` with shared access, then apply anything it deferred.
    fn with_model<R>(&self, f: impl FnOnce(&PlateModel<CanvasLayer>) -> R) -> Option<R> {
        let result = match self.model.try_borrow() {
            Ok(model) => Some(f(&model)),
            Err(_) => {
                log::warn!("plate busy; dropping event");
                None
            }
        };
        self.flush();
        result
    }

    /// Run `op` with exclusive access now, or after the current handler.
    fn exclusive(&self, op: impl FnOnce(&mut PlateModel<CanvasLayer>) + 'static) {
        match self.model.try_borrow_mut() {
            Ok(mut model) => op(&mut model),
            Err(_) => {
                log::debug!("plate busy; deferring until the current handler returns");
                self.deferred.borrow_mut().push(Box::new(op));
            }
        }
    }

    /// Drain queued operations. No-op while an outer handler still holds
    /// the model; that handler flushes on its way out.
    fn flush(&self) {
        loop {
            let Ok(mut model) = self.model.try_borrow_mut() else {
                return;
            };
            let ops = std::mem::take(&mut *self.deferred.borrow_mut());
            if ops.is_empty() {
                return;
            }
            for op in ops {
                op(&mut model);
            }
        }
    }

    fn pending(&self) -> usize {
        self.deferred.borrow().len()
    }
}

/// Run `f` on the model behind `weak`, unless the view is gone.
fn with_model<R>(weak: &Weak<ViewCore>, f: impl FnOnce(&PlateModel<CanvasLayer>) -> R) -> Option<R> {
    weak.upgrade()?.with_model(f)
}

fn client_position(event: &web_sys::Event) -> Option<(f64, f64)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}

/// Interactive plate grid rendered into stacked canvases.
///
/// ```javascript
/// import init, { PlateView } from 'plateview';
/// await init();
/// const plate = new PlateView(8, 12);
/// plate.mount(document.getElementById('plate'));
/// plate.subscribe((state) => console.log(state.selection));
/// plate.update({ colors: wells.map((w) => w.color) });
/// ```
#[wasm_bindgen]
pub struct PlateView {
    core: Rc<ViewCore>,
    state: Behavior<PlateState>,
}

#[wasm_bindgen]
impl PlateView {
    /// Create an unmounted plate with the default look.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32) -> Result<PlateView, JsValue> {
        Ok(Self::build(rows, cols, PlateConfig::default())?)
    }

    /// Create an unmounted plate with a partial `PlateConfig` object.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(rows: u32, cols: u32, config: JsValue) -> Result<PlateView, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            PlateConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(PlateError::from)?
        };
        Ok(Self::build(rows, cols, config)?)
    }

    /// Attach the canvases to `parent` and start tracking its size and the
    /// pointer. `parent` should be a positioned element.
    pub fn mount(&self, parent: HtmlElement) -> Result<(), JsValue> {
        let mut model = self
            .core
            .model
            .try_borrow_mut()
            .map_err(|_| PlateError::Dom("plate is busy".into()))?;
        if model.is_mounted() {
            return Err(PlateError::AlreadyMounted.into());
        }

        let result = self.attach(&mut model, &parent);
        if result.is_err() {
            model.dispose();
        }
        Ok(result?)
    }

    /// Merge a partial state object (`{dimensions?, labels?, colors?,
    /// selection?, highlight?}`) into the current state.
    pub fn update(&self, next: JsValue) -> Result<(), JsValue> {
        let next: PlateUpdate = serde_wasm_bindgen::from_value(next).map_err(PlateError::from)?;
        self.core.with_model(|model| model.update(next));
        Ok(())
    }

    /// Current state snapshot.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&*self.state.get()).map_err(PlateError::from)?)
    }

    /// Committed selection as an array of booleans.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.get().selection).map_err(PlateError::from)?)
    }

    /// `[rows, cols]`.
    pub fn dimensions(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.get().dimensions).map_err(PlateError::from)?)
    }

    /// Call `callback(state)` now and after every state change, until the
    /// returned handle is released or the plate is disposed.
    pub fn subscribe(&self, callback: Function) -> PlateSubscription {
        let inner = self.state.subscribe(move |state: &PlateState| {
            let value = match serde_wasm_bindgen::to_value(state) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("plate state serialization failed: {e}");
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                log::warn!("plate subscriber threw: {e:?}");
            }
        });

        let owned = inner.clone();
        self.core.exclusive(move |model| {
            model.reactive().custom_dispose(move || owned.unsubscribe());
        });
        PlateSubscription { inner }
    }

    /// Remove every listener and subscription and detach the canvases.
    /// Calling it again does nothing. From inside a plate callback it takes
    /// effect as soon as that callback returns.
    pub fn dispose(&self) {
        self.core.exclusive(|model| model.dispose());
    }

    /// Exclusive operations waiting for the current handler to return.
    #[wasm_bindgen(getter, js_name = pendingOperations)]
    pub fn pending_operations(&self) -> usize {
        self.core.pending()
    }
}

impl PlateView {
    fn build(rows: u32, cols: u32, config: PlateConfig) -> PlateResult<Self> {
        init_runtime();
        let document = web_sys::window()
            .ok_or(PlateError::NoWindow)?
            .document()
            .ok_or(PlateError::NoDocument)?;
        let layers = LayerSet::try_new_with(|_| CanvasLayer::new(&document))?;
        let model = PlateModel::with_config(Dimensions::new(rows, cols), layers, config);
        let state = model.behavior().clone();
        log::debug!("plate view created: {rows}x{cols}");
        Ok(Self {
            core: Rc::new(ViewCore::new(model)),
            state,
        })
    }

    fn attach(&self, model: &mut PlateModel<CanvasLayer>, parent: &HtmlElement) -> PlateResult<()> {
        let element: &Element = parent.as_ref();

        let mut canvases = Vec::with_capacity(Layer::STACK_ORDER.len());
        for layer in Layer::STACK_ORDER {
            let canvas = model.layer(layer).clone();
            canvas.attach(element)?;
            canvases.push(canvas);
        }
        model
            .reactive()
            .custom_dispose(move || canvases.iter().for_each(CanvasLayer::detach));

        model.mount_container(Box::new(element.clone()));

        self.observe_resize(model, element)?;
        self.listen_pointer(model, parent)?;
        Ok(())
    }

    fn observe_resize(&self, model: &mut PlateModel<CanvasLayer>, element: &Element) -> PlateResult<()> {
        let weak = Rc::downgrade(&self.core);
        let on_resize = Closure::wrap(Box::new(move |_entries: Array| {
            with_model(&weak, |model| model.handle_resize());
        }) as Box<dyn FnMut(Array)>);

        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())
            .map_err(|e| PlateError::dom(&e))?;
        observer.observe(element);

        let element = element.clone();
        model.reactive().custom_dispose(move || {
            observer.unobserve(&element);
            observer.disconnect();
            drop(on_resize);
        });
        Ok(())
    }

    fn listen_pointer(&self, model: &mut PlateModel<CanvasLayer>, parent: &HtmlElement) -> PlateResult<()> {
        let window: EventTarget = web_sys::window().ok_or(PlateError::NoWindow)?.into();
        let parent: &EventTarget = parent.as_ref();
        let reactive = model.reactive();

        // Movement and release are tracked on the window so a drag keeps
        // following the pointer outside the plate.
        let weak = Rc::downgrade(&self.core);
        reactive.event(
            &window,
            "mousemove",
            move |event| {
                let Some((x, y)) = client_position(&event) else {
                    return;
                };
                if with_model(&weak, |model| model.pointer_move(x, y)) == Some(true) {
                    event.prevent_default();
                }
            },
            None,
        )?;

        let weak = Rc::downgrade(&self.core);
        reactive.event(
            parent,
            "mousedown",
            move |event| {
                if let Some((x, y)) = client_position(&event) {
                    with_model(&weak, |model| model.pointer_down(x, y));
                }
            },
            None,
        )?;

        let weak = Rc::downgrade(&self.core);
        reactive.event(
            &window,
            "mouseup",
            move |_| {
                with_model(&weak, PlateModel::pointer_up);
            },
            None,
        )?;

        let weak = Rc::downgrade(&self.core);
        reactive.event(
            parent,
            "mouseenter",
            move |_| {
                with_model(&weak, PlateModel::pointer_enter);
            },
            None,
        )?;

        let weak = Rc::downgrade(&self.core);
        reactive.event(
            parent,
            "mouseout",
            move |_| {
                with_model(&weak, PlateModel::pointer_leave);
            },
            None,
        )?;

        Ok(())
    }
}

impl Drop for PlateView {
    fn drop(&mut self) {
        self.core.exclusive(|model| model.dispose());
    }
}

/// Handle returned by [`PlateView::subscribe`].
#[wasm_bindgen]
pub struct PlateSubscription {
    inner: Subscription,
}

#[wasm_bindgen]
impl PlateSubscription {
    /// Stop receiving state updates. Idempotent.
    pub fn unsubscribe(&self) {
        self.inner.unsubscribe();
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}
