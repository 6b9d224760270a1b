use crate::audio::{AmbientStage, WebAudioBackend};
use crate::constants::{CAMERA_Z, ORB_RADIUS};
use crate::{dom, picking, Demo};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const AMBIENT_BUTTON_ID: &str = "audio-toggle";
pub const COLOR_INPUT_ID: &str = "color-picker";

pub type WebDemo = Demo<WebAudioBackend>;

#[derive(Clone)]
pub struct UiWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub demo: Rc<RefCell<WebDemo>>,
}

pub fn wire_ui(w: UiWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_pointerup(&w);
    wire_ambient_button(&w);
    wire_color_input(&w);
}

fn ambient_label(stage: AmbientStage) -> &'static str {
    match stage {
        AmbientStage::Running => "Pause ambient",
        AmbientStage::Uninitialized | AmbientStage::Suspended => "Play ambient",
    }
}

/// Whether the pointer is over the orb at its current (eased) scale.
fn pointer_hits_orb(w: &UiWiring, ev: &web::PointerEvent) -> bool {
    let pos = dom::pointer_canvas_px(ev, &w.canvas);
    let radius = ORB_RADIUS * w.demo.borrow().scene.orb.scale.x;
    picking::hits_orb(
        w.canvas.width() as f32,
        w.canvas.height() as f32,
        pos.x,
        pos.y,
        CAMERA_Z,
        radius,
    )
}

fn set_hover(w: &UiWiring, hovered: bool) {
    let was = w.demo.borrow().scene.orb.hovered;
    if was == hovered {
        return;
    }
    if hovered {
        w.demo.borrow_mut().pointer_enter();
    } else {
        w.demo.borrow_mut().pointer_leave();
    }
    _ = w
        .canvas
        .style()
        .set_property("cursor", if hovered { "pointer" } else { "auto" });
}

fn wire_pointermove(w: &UiWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let hit = pointer_hits_orb(&w, &ev);
        set_hover(&w, hit);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &UiWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        set_hover(&w, false);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &UiWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !pointer_hits_orb(&w, &ev) {
            return;
        }
        if let Err(e) = w.demo.borrow_mut().click() {
            log::error!("[click] audio error: {}", e);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_ambient_button(w: &UiWiring) {
    let demo = w.demo.clone();
    let document = w.document.clone();
    dom::set_text(&document, AMBIENT_BUTTON_ID, ambient_label(AmbientStage::Uninitialized));
    dom::add_click_listener(&w.document, AMBIENT_BUTTON_ID, move || {
        let result = demo.borrow_mut().toggle_ambient();
        match result {
            Ok(stage) => dom::set_text(&document, AMBIENT_BUTTON_ID, ambient_label(stage)),
            Err(e) => log::error!("[audio] ambient toggle failed: {}", e),
        }
    });
}

fn wire_color_input(w: &UiWiring) {
    let demo = w.demo.clone();
    dom::add_input_listener(&w.document, COLOR_INPUT_ID, move |value| {
        demo.borrow_mut().set_color(value);
    });
}
