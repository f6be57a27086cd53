use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Element;
use yew::prelude::*;

use crate::connectors::{NodeElementMap, draw_connections};
use crate::layout::group_by_depth;
use crate::model::Tree;
use crate::state::{MAX_SCALE, MIN_SCALE, Transform, TouchState, Viewport, fit_transform};
use crate::util::cerror;

use super::camera_controls::CameraControls;
use super::node_card::NodeCard;

const LEVEL_STYLE: &str =
    "display:flex; justify-content:center; align-items:flex-start; gap:24px; margin-bottom:48px;";

#[derive(Properties, PartialEq, Clone)]
pub struct TreeViewProps {
    pub tree: Rc<Tree>,
    /// Render generation; a new value means a new snapshot, even if equal.
    pub version: u64,
}

fn content_style(t: Transform) -> String {
    format!(
        "position:absolute; top:0; left:0; width:max-content; transform-origin:0 0; transform:translate({}px, {}px) scale({});",
        t.x, t.y, t.scale
    )
}

fn apply_transform(content: &Element, t: Transform) {
    let _ = content.set_attribute("style", &content_style(t));
}

/// Measure the content at identity scale, then fit and center it.
fn fit_to_container(container: &Element, content: &Element, viewport: &Rc<RefCell<Viewport>>) {
    apply_transform(content, Transform::default());
    let container_rect = container.get_bounding_client_rect();
    let content_rect = content.get_bounding_client_rect();
    let fitted = fit_transform(
        container_rect.width(),
        container_rect.height(),
        content_rect.width(),
        content_rect.height(),
    );
    viewport.borrow_mut().transform = fitted;
}

#[function_component(TreeView)]
pub fn tree_view(props: &TreeViewProps) -> Html {
    let container_ref = use_node_ref();
    let content_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let touch_state = use_mut_ref(TouchState::default);
    let redraw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);

    let levels = group_by_depth(&props.tree.nodes);
    let node_refs: HashMap<String, NodeRef> = props
        .tree
        .nodes
        .iter()
        .map(|n| (n.id.clone(), NodeRef::default()))
        .collect();

    // Effect: a new snapshot arrived. Rebuild the element map from the cards
    // just rendered, refit the viewport, redraw the overlay, and publish the
    // redraw closure for the gesture handlers.
    {
        let tree = props.tree.clone();
        let node_refs = node_refs.clone();
        let container_ref = container_ref.clone();
        let content_ref = content_ref.clone();
        let viewport = viewport.clone();
        let redraw_ref = redraw_ref.clone();
        use_effect_with(props.version, move |_| {
            let mut elements: NodeElementMap = HashMap::new();
            for (id, node_ref) in &node_refs {
                if let Some(el) = node_ref.cast::<Element>() {
                    elements.insert(id.clone(), el);
                }
            }
            let elements = Rc::new(elements);

            let redraw: Rc<dyn Fn()> = {
                let container_ref = container_ref.clone();
                let content_ref = content_ref.clone();
                let viewport = viewport.clone();
                let tree = tree.clone();
                Rc::new(move || {
                    let Some(container) = container_ref.cast::<Element>() else {
                        return;
                    };
                    let Some(content) = content_ref.cast::<Element>() else {
                        return;
                    };
                    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                        return;
                    };
                    let transform = viewport.borrow().transform;
                    apply_transform(&content, transform);
                    if let Err(err) =
                        draw_connections(&document, &container, &content, &tree, &elements, transform)
                    {
                        cerror(&err);
                    }
                })
            };

            if let (Some(container), Some(content)) =
                (container_ref.cast::<Element>(), content_ref.cast::<Element>())
            {
                fit_to_container(&container, &content, &viewport);
            }
            (redraw)();
            *redraw_ref.borrow_mut() = Some(redraw);
            || ()
        });
    }

    // Mount effect: pan/zoom gesture listeners on the container. Every
    // handler mutates the viewport and then redraws synchronously, so the
    // overlay follows the gesture within the same event dispatch.
    {
        let container_ref = container_ref.clone();
        let viewport = viewport.clone();
        let touch_state = touch_state.clone();
        let redraw_ref = redraw_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let container: Element = container_ref.cast::<Element>().expect("tree container");

            let redraw_now: Rc<dyn Fn()> = {
                let redraw_ref = redraw_ref.clone();
                Rc::new(move || {
                    if let Some(f) = &*redraw_ref.borrow() {
                        f();
                    }
                })
            };

            // Wheel zoom about the cursor
            let wheel_cb = {
                let container = container.clone();
                let viewport = viewport.clone();
                let redraw_now = redraw_now.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let rect = container.get_bounding_client_rect();
                    let cx = e.client_x() as f64 - rect.left();
                    let cy = e.client_y() as f64 - rect.top();
                    let factor = (-e.delta_y() * 0.001).exp();
                    viewport.borrow_mut().zoom_about(cx, cy, factor);
                    redraw_now();
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            // Left-drag pan
            let mousedown_cb = {
                let viewport = viewport.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    e.prevent_default();
                    viewport
                        .borrow_mut()
                        .begin_pan(e.client_x() as f64, e.client_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .unwrap();

            let mousemove_cb = {
                let viewport = viewport.clone();
                let redraw_now = redraw_now.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut vp = viewport.borrow_mut();
                    if !vp.panning {
                        return;
                    }
                    vp.pan_move(e.client_x() as f64, e.client_y() as f64);
                    drop(vp);
                    redraw_now();
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .unwrap();

            // End the pan on the window so a release outside the pane counts
            let mouseup_cb = {
                let viewport = viewport.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    viewport.borrow_mut().end_pan();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            // Single-finger pan, two-finger pinch
            let touch_start_cb = {
                let container = container.clone();
                let viewport = viewport.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                    let touches = e.touches();
                    let rect = container.get_bounding_client_rect();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let mut ts = touch_state.borrow_mut();
                            ts.single_active = true;
                            ts.pinch = false;
                            ts.last_x = t0.client_x() as f64 - rect.left();
                            ts.last_y = t0.client_y() as f64 - rect.top();
                        }
                    } else if touches.length() >= 2 {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            let x0 = t0.client_x() as f64 - rect.left();
                            let y0 = t0.client_y() as f64 - rect.top();
                            let x1 = t1.client_x() as f64 - rect.left();
                            let y1 = t1.client_y() as f64 - rect.top();
                            let dist = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1.0);
                            let midx = (x0 + x1) * 0.5;
                            let midy = (y0 + y1) * 0.5;
                            let t = viewport.borrow().transform;
                            let mut ts = touch_state.borrow_mut();
                            ts.pinch = true;
                            ts.single_active = false;
                            ts.start_dist = dist;
                            ts.start_scale = t.scale;
                            ts.content_cx = (midx - t.x) / t.scale;
                            ts.content_cy = (midy - t.y) / t.scale;
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let container = container.clone();
                let viewport = viewport.clone();
                let touch_state = touch_state.clone();
                let redraw_now = redraw_now.clone();
                Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                    let touches = e.touches();
                    let rect = container.get_bounding_client_rect();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let x = t0.client_x() as f64 - rect.left();
                            let y = t0.client_y() as f64 - rect.top();
                            let mut ts = touch_state.borrow_mut();
                            if ts.single_active {
                                let dx = x - ts.last_x;
                                let dy = y - ts.last_y;
                                ts.last_x = x;
                                ts.last_y = y;
                                drop(ts);
                                viewport.borrow_mut().pan_by(dx, dy);
                                redraw_now();
                            }
                        }
                    } else if touches.length() >= 2 {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            let x0 = t0.client_x() as f64 - rect.left();
                            let y0 = t0.client_y() as f64 - rect.top();
                            let x1 = t1.client_x() as f64 - rect.left();
                            let y1 = t1.client_y() as f64 - rect.top();
                            let dist = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1.0);
                            let midx = (x0 + x1) * 0.5;
                            let midy = (y0 + y1) * 0.5;
                            let ts = touch_state.borrow();
                            if ts.pinch {
                                let new_scale = (ts.start_scale * dist / ts.start_dist)
                                    .clamp(MIN_SCALE, MAX_SCALE);
                                let mut vp = viewport.borrow_mut();
                                vp.transform.scale = new_scale;
                                vp.transform.x = midx - ts.content_cx * new_scale;
                                vp.transform.y = midy - ts.content_cy * new_scale;
                                drop(vp);
                                drop(ts);
                                redraw_now();
                            }
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: web_sys::TouchEvent| {
                    let left = e.touches().length();
                    let mut ts = touch_state.borrow_mut();
                    if left == 0 {
                        ts.single_active = false;
                        ts.pinch = false;
                    } else if left == 1 {
                        ts.pinch = false;
                        ts.single_active = true;
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            container
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let window_clone = window.clone();
            move || {
                let _ = container.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &wheel_cb,
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                );
            }
        });
    }

    let zoom_in = {
        let container_ref = container_ref.clone();
        let viewport = viewport.clone();
        let redraw_ref = redraw_ref.clone();
        Callback::from(move |_| {
            let Some(container) = container_ref.cast::<Element>() else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            viewport
                .borrow_mut()
                .zoom_about(rect.width() * 0.5, rect.height() * 0.5, 1.25);
            if let Some(f) = &*redraw_ref.borrow() {
                f();
            }
        })
    };
    let zoom_out = {
        let container_ref = container_ref.clone();
        let viewport = viewport.clone();
        let redraw_ref = redraw_ref.clone();
        Callback::from(move |_| {
            let Some(container) = container_ref.cast::<Element>() else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            viewport
                .borrow_mut()
                .zoom_about(rect.width() * 0.5, rect.height() * 0.5, 0.8);
            if let Some(f) = &*redraw_ref.borrow() {
                f();
            }
        })
    };
    let center = {
        let container_ref = container_ref.clone();
        let content_ref = content_ref.clone();
        let viewport = viewport.clone();
        let redraw_ref = redraw_ref.clone();
        Callback::from(move |_| {
            let (Some(container), Some(content)) =
                (container_ref.cast::<Element>(), content_ref.cast::<Element>())
            else {
                return;
            };
            fit_to_container(&container, &content, &viewport);
            if let Some(f) = &*redraw_ref.borrow() {
                f();
            }
        })
    };

    html! {
        <div ref={container_ref.clone()}
            style="position:relative; flex:1; min-width:0; overflow:hidden; background:#0e1116; border:1px solid #30363d; border-radius:8px;">
            <div ref={content_ref.clone()} style={content_style(Transform::default())}>
                { for levels.iter().map(|(depth, nodes)| html! {
                    <div key={depth.to_string()} class="tree-level" style={LEVEL_STYLE}>
                        { for nodes.iter().map(|node| {
                            let node = *node;
                            html! {
                                <NodeCard
                                    key={node.id.clone()}
                                    node={node.clone()}
                                    node_ref={node_refs.get(&node.id).cloned().unwrap_or_default()}
                                />
                            }
                        }) }
                    </div>
                }) }
            </div>
            <CameraControls on_zoom_in={zoom_in} on_zoom_out={zoom_out} on_center={center} />
        </div>
    }
}
