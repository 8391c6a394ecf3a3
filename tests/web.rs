//! Browser tests for `PlateView`.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::Cell;
use std::rc::Rc;

use plateview::render::{CanvasLayer, DrawSurface};
use plateview::PlateView;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    element
        .set_attribute("style", "position: relative; width: 320px; height: 240px")
        .unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn mount_appends_four_canvases_and_dispose_removes_them() {
    let parent = container();
    let plate = PlateView::new(8, 12).unwrap();

    plate.mount(parent.clone()).unwrap();
    assert_eq!(parent.child_element_count(), 4);

    plate.dispose();
    plate.dispose();
    assert_eq!(parent.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn second_mount_is_rejected() {
    let parent = container();
    let plate = PlateView::new(2, 2).unwrap();
    plate.mount(parent.clone()).unwrap();
    assert!(plate.mount(parent).is_err());
    plate.dispose();
}

#[wasm_bindgen_test]
fn subscribers_receive_updates_until_dispose() {
    let plate = PlateView::new(2, 2).unwrap();
    let calls = Rc::new(Cell::new(0));
    let callback = {
        let calls = Rc::clone(&calls);
        Closure::wrap(Box::new(move |_state: JsValue| calls.set(calls.get() + 1))
            as Box<dyn FnMut(JsValue)>)
    };
    let subscription = plate.subscribe(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());
    assert_eq!(calls.get(), 1);

    let update = js_sys::JSON::parse(r#"{"selection": [true, false, false, true]}"#).unwrap();
    plate.update(update).unwrap();
    assert_eq!(calls.get(), 2);

    plate.dispose();
    assert!(!subscription.is_active());
    let update = js_sys::JSON::parse(r#"{"dimensions": [3, 3]}"#).unwrap();
    plate.update(update).unwrap();
    assert_eq!(calls.get(), 2);
}

#[wasm_bindgen_test]
fn config_object_overrides_defaults() {
    let config = js_sys::JSON::parse(r#"{"leftOffset": 40, "selectColor": "red"}"#).unwrap();
    let plate = PlateView::with_config(4, 6, config).unwrap();
    let dims = plate.dimensions().unwrap();
    assert_eq!(js_sys::JSON::stringify(&dims).unwrap(), "[4,6]");
}

#[wasm_bindgen_test]
fn fallible_context_calls_apply_on_a_live_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    let mut layer = CanvasLayer::new(&document).unwrap();
    layer.resize(40.0, 40.0);

    layer.set_line_dash(&[5.0, 3.0]);
    layer.save();
    layer.scale(0.5, 1.0);
    layer.fill_text("A1", 10.0, 10.0);
    layer.restore();

    let ctx: CanvasRenderingContext2d = layer
        .canvas()
        .get_context("2d")
        .unwrap()
        .unwrap()
        .unchecked_into();
    let dash = ctx.get_line_dash();
    assert_eq!(dash.length(), 2);
    assert_eq!(dash.get(0).as_f64(), Some(5.0));
}

#[wasm_bindgen_test]
fn subscriber_may_update_and_dispose_from_inside_a_notification() {
    let parent = container();
    let plate = Rc::new(PlateView::new(2, 2).unwrap());
    plate.mount(parent.clone()).unwrap();

    let calls = Rc::new(Cell::new(0));
    let callback = {
        let calls = Rc::clone(&calls);
        let weak = Rc::downgrade(&plate);
        Closure::wrap(Box::new(move |_state: JsValue| {
            calls.set(calls.get() + 1);
            let Some(plate) = weak.upgrade() else { return };
            match calls.get() {
                2 => {
                    let colors = js_sys::JSON::parse(r#"{"colors": ["red", null, null, null]}"#).unwrap();
                    plate.update(colors).unwrap();
                }
                3 => plate.dispose(),
                _ => {}
            }
        }) as Box<dyn FnMut(JsValue)>)
    };
    let subscription = plate.subscribe(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    let update = js_sys::JSON::parse(r#"{"selection": [true, false, false, false]}"#).unwrap();
    plate.update(update).unwrap();

    // Selection, then the nested color update, then dispose once both returned.
    assert_eq!(calls.get(), 3);
    let state = plate.state().unwrap();
    let colors = js_sys::Reflect::get(&state, &JsValue::from_str("colors")).unwrap();
    assert_eq!(js_sys::JSON::stringify(&colors).unwrap(), r#"["red",null,null,null]"#);
    assert_eq!(plate.pending_operations(), 0);
    assert!(!subscription.is_active());
    assert_eq!(parent.child_element_count(), 0);
}
