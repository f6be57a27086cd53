//! Connector overlay for the tree pane. Every redraw rebuilds the whole SVG
//! layer from the live node boxes; there is no incremental diffing, which
//! keeps stale edges impossible when a new snapshot replaces the old one.

use std::collections::HashMap;

use web_sys::{Document, Element, Node};

use crate::model::{Tree, TreeEdge};
use crate::state::Transform;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

const OVERLAY_STYLE: &str =
    "position:absolute; top:0; left:0; width:100%; height:100%; pointer-events:none; overflow:visible;";

/// Realized on-screen visual per node id. Rebuilt for every tree render and
/// discarded with it.
pub type NodeElementMap = HashMap<String, Element>;

/// Screen-space box of a rendered element, relative to the page viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenBox {
    pub fn from_dom_rect(rect: &web_sys::DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Both endpoint visuals of an edge, or None when either is missing. Edges
/// referencing unknown node ids are skipped rather than failing the render.
pub fn edge_endpoints<'a, T>(
    edge: &TreeEdge,
    elements: &'a HashMap<String, T>,
) -> Option<(&'a T, &'a T)> {
    Some((elements.get(&edge.from)?, elements.get(&edge.to)?))
}

/// Anchor points for one connector: parent bottom-center to child top-center.
/// The boxes come from live bounding rects, which already carry the viewport
/// transform, so the anchors are mapped back into content space; the overlay
/// group then re-applies the same transform and stays in lockstep with the
/// node layer.
pub fn edge_anchors(
    from: ScreenBox,
    to: ScreenBox,
    container: ScreenBox,
    transform: Transform,
) -> (f64, f64, f64, f64) {
    let x1 = from.left + from.width / 2.0 - container.left;
    let y1 = from.top + from.height - container.top;
    let x2 = to.left + to.width / 2.0 - container.left;
    let y2 = to.top - container.top;
    (
        (x1 - transform.x) / transform.scale,
        (y1 - transform.y) / transform.scale,
        (x2 - transform.x) / transform.scale,
        (y2 - transform.y) / transform.scale,
    )
}

/// Cubic curve whose control points sit at the vertical midpoint, giving the
/// connector a smooth vertical S-flow instead of a straight line.
pub fn connector_path(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    let mid_y = y1 + (y2 - y1) / 2.0;
    format!("M {x1},{y1} C {x1},{mid_y} {x2},{mid_y} {x2},{y2}")
}

fn create_svg_element(document: &Document, name: &str) -> Result<Element, String> {
    document
        .create_element_ns(Some(SVG_NS), name)
        .map_err(|_| format!("connections: failed to create <{name}>"))
}

/// Replace the connector overlay: remove any previous layer, then draw one
/// path per edge whose endpoints both resolved to rendered nodes.
pub fn draw_connections(
    document: &Document,
    container: &Element,
    content: &Element,
    tree: &Tree,
    elements: &NodeElementMap,
    transform: Transform,
) -> Result<(), String> {
    if let Ok(Some(old)) = container.query_selector(".connections-layer") {
        old.remove();
    }

    let svg = create_svg_element(document, "svg")?;
    svg.set_attribute("class", "connections-layer")
        .map_err(|_| "connections: failed to tag the overlay".to_string())?;
    svg.set_attribute("style", OVERLAY_STYLE)
        .map_err(|_| "connections: failed to style the overlay".to_string())?;

    let group = create_svg_element(document, "g")?;
    group
        .set_attribute(
            "transform",
            &format!(
                "translate({}, {}) scale({})",
                transform.x, transform.y, transform.scale
            ),
        )
        .map_err(|_| "connections: failed to set the group transform".to_string())?;

    let container_box = ScreenBox::from_dom_rect(&container.get_bounding_client_rect());
    for edge in &tree.edges {
        let Some((from_el, to_el)) = edge_endpoints(edge, elements) else {
            continue;
        };
        let from_box = ScreenBox::from_dom_rect(&from_el.get_bounding_client_rect());
        let to_box = ScreenBox::from_dom_rect(&to_el.get_bounding_client_rect());
        let (x1, y1, x2, y2) = edge_anchors(from_box, to_box, container_box, transform);

        let path = create_svg_element(document, "path")?;
        path.set_attribute("d", &connector_path(x1, y1, x2, y2))
            .map_err(|_| "connections: failed to set a path".to_string())?;
        // Styling is left to the page stylesheet; the renderer only tags.
        let class = if edge.is_pruned {
            "connection-line pruned"
        } else {
            "connection-line"
        };
        path.set_attribute("class", class)
            .map_err(|_| "connections: failed to tag a path".to_string())?;
        group
            .append_child(&path)
            .map_err(|_| "connections: failed to attach a path".to_string())?;
    }

    svg.append_child(&group)
        .map_err(|_| "connections: failed to attach the group".to_string())?;
    let content_node: &Node = content;
    container
        .insert_before(&svg, Some(content_node))
        .map_err(|_| "connections: failed to attach the overlay".to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeEdge;

    fn edge(from: &str, to: &str) -> TreeEdge {
        TreeEdge {
            from: from.to_string(),
            to: to.to_string(),
            is_pruned: false,
        }
    }

    #[test]
    fn anchors_at_identity_match_the_raw_boxes() {
        let from = ScreenBox { left: 100.0, top: 50.0, width: 40.0, height: 60.0 };
        let to = ScreenBox { left: 200.0, top: 200.0, width: 40.0, height: 30.0 };
        let container = ScreenBox { left: 0.0, top: 0.0, width: 800.0, height: 600.0 };
        let (x1, y1, x2, y2) = edge_anchors(from, to, container, Transform::default());
        assert_eq!((x1, y1, x2, y2), (120.0, 110.0, 220.0, 200.0));
    }

    #[test]
    fn anchors_invert_the_viewport_transform() {
        let from = ScreenBox { left: 100.0, top: 50.0, width: 40.0, height: 60.0 };
        let to = ScreenBox { left: 200.0, top: 200.0, width: 40.0, height: 30.0 };
        let container = ScreenBox { left: 0.0, top: 0.0, width: 800.0, height: 600.0 };
        let t = Transform { x: 10.0, y: 20.0, scale: 2.0 };
        let (x1, y1, x2, y2) = edge_anchors(from, to, container, t);
        // Re-applying the transform must land back on the screen anchors.
        assert_eq!(x1 * t.scale + t.x, 120.0);
        assert_eq!(y1 * t.scale + t.y, 110.0);
        assert_eq!(x2 * t.scale + t.x, 220.0);
        assert_eq!(y2 * t.scale + t.y, 200.0);
    }

    #[test]
    fn anchors_are_container_relative() {
        let from = ScreenBox { left: 130.0, top: 70.0, width: 40.0, height: 60.0 };
        let to = ScreenBox { left: 230.0, top: 220.0, width: 40.0, height: 30.0 };
        let container = ScreenBox { left: 30.0, top: 20.0, width: 800.0, height: 600.0 };
        let (x1, y1, x2, y2) = edge_anchors(from, to, container, Transform::default());
        assert_eq!((x1, y1, x2, y2), (120.0, 110.0, 220.0, 200.0));
    }

    #[test]
    fn path_bends_at_the_vertical_midpoint() {
        assert_eq!(
            connector_path(120.0, 110.0, 220.0, 200.0),
            "M 120,110 C 120,155 220,155 220,200"
        );
    }

    #[test]
    fn path_geometry_is_deterministic() {
        let a = connector_path(12.5, 40.0, 87.5, 160.0);
        let b = connector_path(12.5, 40.0, 87.5, 160.0);
        assert_eq!(a, b);
    }

    #[test]
    fn edges_with_missing_endpoints_resolve_to_none() {
        let mut elements: HashMap<String, ()> = HashMap::new();
        elements.insert("a".to_string(), ());
        elements.insert("b".to_string(), ());
        assert!(edge_endpoints(&edge("a", "b"), &elements).is_some());
        assert!(edge_endpoints(&edge("a", "missing"), &elements).is_none());
        assert!(edge_endpoints(&edge("missing", "b"), &elements).is_none());
    }
}
