use dioxus::html::input_data::keyboard_types::Modifiers;
use dioxus::prelude::*;
use floorplan_shared::boundary::{Axis, EdgeLength, SnapGuide};
use floorplan_shared::grid::format_feet;
use floorplan_shared::hit_test::HitTarget;
use floorplan_shared::input::{InputEvent, PointerEvent, PointerPhase};
use floorplan_shared::models::{Point, Rect, Rotation, Table, TableStatus, Zone};
use floorplan_shared::selection::Selection;
use floorplan_shared::viewport::Viewport;
use floorplan_shared::{EditMode, FloorPlanEditor};

use crate::components::edit;
use crate::coords::{self, CANVAS_ID};
use crate::shortcuts::{self, Shortcut};

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

const ROOM_FILL: &str = "#f8fafc";
const ROOM_STROKE: &str = "#334155";
const GRID_STROKE: &str = "rgba(148,163,184,0.35)";
const SELECTION_STROKE: &str = "#2563eb";
const GUIDE_STROKE: &str = "#ec4899";

pub fn status_color(status: TableStatus) -> &'static str {
    match status {
        TableStatus::Available => "#86efac",
        TableStatus::Booked => "#fcd34d",
        TableStatus::Paid => "#93c5fd",
        TableStatus::Reserved => "#d8b4fe",
        TableStatus::Occupied => "#fca5a5",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// SVG builders. Everything is emitted in canvas pixels.
// ---------------------------------------------------------------------------

/// Grid spacing in feet: the smallest step that keeps lines at least 12px apart.
fn grid_step(pixels_per_foot: f64) -> f64 {
    const STEPS: [f64; 5] = [1.0, 5.0, 10.0, 25.0, 50.0];
    STEPS
        .into_iter()
        .find(|step| step * pixels_per_foot >= 12.0)
        .unwrap_or(100.0)
}

/// Full scene for the current editor state.
pub fn build_scene(editor: &FloorPlanEditor) -> String {
    let mut svg = String::with_capacity(16 * 1024);
    let viewport = editor.viewport();
    let plan = editor.plan();
    let outline = editor.outline();
    let editing_boundary = editor.mode() == EditMode::Boundary;

    build_room(&mut svg, viewport, &outline);
    build_grid(&mut svg, viewport, plan.venue.bounds());
    build_outline(&mut svg, viewport, &outline, editing_boundary);
    build_tables(
        &mut svg,
        viewport,
        &plan.tables,
        &plan.zones,
        editor.selection(),
        editor.mode() == EditMode::Zones,
    );
    if editing_boundary {
        build_edge_lengths(&mut svg, viewport, &editor.edge_lengths());
        build_handles(&mut svg, viewport, &outline, editor.config().handle_radius_px);
    }
    build_snap_guides(&mut svg, viewport, editor.snap_guides());
    if let Some(marquee) = editor.marquee() {
        build_marquee(&mut svg, marquee);
    }
    svg
}

fn points_attr(viewport: &Viewport, outline: &[Point]) -> String {
    outline
        .iter()
        .map(|p| {
            let s = viewport.to_screen(*p);
            format!("{},{}", s.x, s.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_room(svg: &mut String, viewport: &Viewport, outline: &[Point]) {
    let points = points_attr(viewport, outline);
    svg.push_str(&format!(
        r#"<polygon points="{points}" fill="{ROOM_FILL}" stroke="none"/>"#
    ));
}

fn build_grid(svg: &mut String, viewport: &Viewport, bounds: Rect) {
    let step = grid_step(viewport.pixels_per_foot());
    let top = viewport.to_screen(bounds.min);
    let bottom = viewport.to_screen(bounds.max);

    let mut x = (bounds.min.x / step).ceil() * step;
    while x <= bounds.max.x {
        let sx = viewport.to_screen(Point::new(x, 0.0)).x;
        svg.push_str(&format!(
            r#"<line x1="{sx}" y1="{}" x2="{sx}" y2="{}" stroke="{GRID_STROKE}" stroke-width="1"/>"#,
            top.y, bottom.y
        ));
        x += step;
    }
    let mut y = (bounds.min.y / step).ceil() * step;
    while y <= bounds.max.y {
        let sy = viewport.to_screen(Point::new(0.0, y)).y;
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{sy}" x2="{}" y2="{sy}" stroke="{GRID_STROKE}" stroke-width="1"/>"#,
            top.x, bottom.x
        ));
        y += step;
    }
}

fn build_outline(svg: &mut String, viewport: &Viewport, outline: &[Point], editing: bool) {
    let points = points_attr(viewport, outline);
    let dash = if editing { r#" stroke-dasharray="8 4""# } else { "" };
    svg.push_str(&format!(
        r#"<polygon points="{points}" fill="none" stroke="{ROOM_STROKE}" stroke-width="3"{dash}/>"#
    ));
}

fn label_transform(table: &Table, center: Point) -> String {
    match table.rotation {
        Rotation::Deg90 => format!(r#" transform="rotate(90 {} {})""#, center.x, center.y),
        Rotation::Deg270 => format!(r#" transform="rotate(-90 {} {})""#, center.x, center.y),
        Rotation::Deg0 | Rotation::Deg180 => String::new(),
    }
}

fn build_tables(
    svg: &mut String,
    viewport: &Viewport,
    tables: &[Table],
    zones: &[Zone],
    selection: &Selection,
    zone_mode: bool,
) {
    for table in tables {
        let r = viewport.rect_to_screen(table.rect());
        let (x, y, w, h) = (r.min.x, r.min.y, r.width(), r.height());
        let zone = table.zone_id.and_then(|id| zones.iter().find(|z| z.id == id));
        let fill = match (zone_mode, zone) {
            (true, Some(zone)) => zone.color.as_str(),
            (true, None) => "#e2e8f0",
            (false, _) => status_color(table.status),
        };
        let selected = selection.contains(table.id);
        let (stroke, sw) = if selected {
            (SELECTION_STROKE, 3.0)
        } else {
            ("#1e293b", 1.0)
        };

        let mut title = format!("{} ({})", table.label, table.status);
        if let Some(vendor) = &table.vendor_id {
            title.push_str(&format!(" vendor {vendor}"));
        }
        if let Some(zone) = zone {
            title.push_str(&format!(" zone {}", zone.name));
        }

        svg.push_str(&format!(
            r#"<g data-table="{}"><title>{}</title>"#,
            table.id,
            escape_xml(&title)
        ));
        let fill = escape_xml(fill);
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#
        ));
        if let (false, Some(zone)) = (zone_mode, zone) {
            let band = (h * 0.15).clamp(2.0, 6.0);
            let color = escape_xml(&zone.color);
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{w}" height="{band}" fill="{color}"/>"#
            ));
        }
        let center = r.center();
        let fs = (w.min(h) * 0.45).clamp(6.0, 16.0);
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{fs}" font-family="sans-serif" font-weight="600" fill="{ROOM_STROKE}" text-anchor="middle" dominant-baseline="central"{}>{}</text>"#,
            center.x,
            center.y,
            label_transform(table, center),
            escape_xml(&table.label)
        ));
        svg.push_str("</g>");
    }
}

fn build_edge_lengths(svg: &mut String, viewport: &Viewport, edges: &[EdgeLength]) {
    for edge in edges {
        let m = viewport.to_screen(edge.midpoint());
        let text = format_feet(edge.length);
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12" font-family="sans-serif" fill="{ROOM_STROKE}" text-anchor="middle" stroke="white" stroke-width="3" paint-order="stroke">{text}</text>"#,
            m.x,
            m.y - 12.0
        ));
    }
}

fn build_handles(svg: &mut String, viewport: &Viewport, outline: &[Point], radius: f64) {
    let n = outline.len();
    for i in 0..n {
        let a = viewport.to_screen(outline[i]);
        let b = viewport.to_screen(outline[(i + 1) % n]);
        let mx = (a.x + b.x) / 2.0;
        let my = (a.y + b.y) / 2.0;
        let r = radius * 0.5;
        svg.push_str(&format!(
            r#"<circle data-edge="{i}" cx="{mx}" cy="{my}" r="{r}" fill="white" stroke="{SELECTION_STROKE}" stroke-width="1.5" stroke-dasharray="2 2"/>"#
        ));
    }
    for (i, p) in outline.iter().enumerate() {
        let s = viewport.to_screen(*p);
        let r = radius * 0.75;
        svg.push_str(&format!(
            r#"<circle data-vertex="{i}" cx="{}" cy="{}" r="{r}" fill="{SELECTION_STROKE}" stroke="white" stroke-width="2"/>"#,
            s.x, s.y
        ));
    }
}

fn build_snap_guides(svg: &mut String, viewport: &Viewport, guides: &[SnapGuide]) {
    for guide in guides {
        let a = viewport.to_screen(guide.from);
        let b = viewport.to_screen(guide.to);
        let axis = match guide.axis {
            Axis::X => "x",
            Axis::Y => "y",
        };
        svg.push_str(&format!(
            r#"<line data-guide="{axis}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{GUIDE_STROKE}" stroke-width="1" stroke-dasharray="4 3"/>"#,
            a.x, a.y, b.x, b.y
        ));
    }
}

fn build_marquee(svg: &mut String, marquee: Rect) {
    svg.push_str(&format!(
        r#"<rect class="marquee" x="{}" y="{}" width="{}" height="{}" fill="rgba(37,99,235,0.12)" stroke="{SELECTION_STROKE}" stroke-width="1" stroke-dasharray="4 2"/>"#,
        marquee.min.x,
        marquee.min.y,
        marquee.width(),
        marquee.height()
    ));
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

fn apply_shortcut(editor: Signal<FloorPlanEditor>, mut show_help: Signal<bool>, shortcut: Shortcut) {
    match shortcut {
        Shortcut::DeleteSelection => {
            edit(editor, |ed| ed.delete_selected());
        }
        Shortcut::ClearSelection => {
            show_help.set(false);
            edit(editor, |ed| ed.clear_selection());
        }
        Shortcut::FitRoom => {
            edit(editor, |ed| ed.fit_to_room());
        }
        Shortcut::ZoomIn => {
            edit(editor, |ed| ed.zoom_in());
        }
        Shortcut::ZoomOut => {
            edit(editor, |ed| ed.zoom_out());
        }
        Shortcut::ToggleHelp => {
            let shown = *show_help.read();
            show_help.set(!shown);
        }
    }
}

#[component]
pub fn FloorPlanView(editor: Signal<FloorPlanEditor>, show_help: Signal<bool>) -> Element {
    // Mouse button held, so moves outside a press are not forwarded.
    let mut pressed = use_signal(|| false);
    let mut last_touch = use_signal(|| Point::ORIGIN);

    let svg_html = use_memo(move || {
        let scene = build_scene(&editor.read());
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" style="position:absolute;top:0;left:0;pointer-events:none;">{scene}</svg>"#
        )
    });

    let ed = editor.read();
    let canvas_class = match (ed.is_interacting(), ed.mode()) {
        (true, _) => "canvas interacting",
        (false, EditMode::Boundary) => "canvas boundary-mode",
        (false, EditMode::Zones) => "canvas zone-mode",
        (false, EditMode::Tables) => "canvas",
    };
    drop(ed);

    let touch_points = |evt: &Event<TouchData>| -> Vec<Point> {
        evt.data()
            .touches()
            .iter()
            .filter_map(|t| {
                let c = t.client_coordinates();
                coords::to_canvas(c.x, c.y)
            })
            .collect()
    };

    rsx! {
        div {
            id: CANVAS_ID,
            class: "{canvas_class}",
            tabindex: "0",
            onmounted: move |_| coords::focus_canvas(),

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let client = evt.data().client_coordinates();
                let Some(position) = coords::to_canvas(client.x, client.y) else { return };
                let delta_y = coords::wheel_delta_y(evt.data().delta());
                edit(editor, |ed| ed.handle(InputEvent::Wheel { position, delta_y }));
            },

            onmousedown: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                let Some(position) = coords::to_canvas(client.x, client.y) else { return };
                let additive = evt
                    .modifiers()
                    .intersects(Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::META);
                let target = editor.read().hit_test(position);
                let mut ev = PointerEvent::down(position)
                    .with_button(coords::pointer_button(evt.trigger_button()))
                    .with_target(target);
                if additive {
                    ev = ev.additive();
                }
                pressed.set(true);
                edit(editor, |ed| ed.handle(ev));
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*pressed.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let Some(position) = coords::to_canvas(client.x, client.y) else { return };
                edit(editor, |ed| ed.handle(PointerEvent::moved(position)));
            },

            onmouseup: move |evt: Event<MouseData>| {
                if !*pressed.read() {
                    return;
                }
                pressed.set(false);
                let client = evt.client_coordinates();
                let Some(position) = coords::to_canvas(client.x, client.y) else { return };
                edit(editor, |ed| ed.handle(PointerEvent::up(position)));
            },

            onmouseleave: move |evt: Event<MouseData>| {
                if !*pressed.read() {
                    return;
                }
                pressed.set(false);
                let client = evt.client_coordinates();
                let position = coords::to_canvas(client.x, client.y).unwrap_or_default();
                edit(editor, |ed| ed.handle(PointerEvent::up(position)));
            },

            oncontextmenu: move |evt: Event<MouseData>| {
                evt.prevent_default();
            },

            // Double-clicking a boundary vertex removes it.
            ondoubleclick: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                let Some(position) = coords::to_canvas(client.x, client.y) else { return };
                if let HitTarget::Vertex(index) = editor.read().hit_test(position) {
                    edit(editor, |ed| ed.delete_vertex(index));
                }
            },

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                let mut ev = coords::touch_event(PointerPhase::Down, &points, *last_touch.read());
                if let [only] = points.as_slice() {
                    last_touch.set(*only);
                    ev = ev.with_target(editor.read().hit_test(*only));
                }
                edit(editor, |ed| ed.handle(ev));
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                if let Some(first) = points.first() {
                    last_touch.set(*first);
                }
                let ev = coords::touch_event(PointerPhase::Move, &points, *last_touch.read());
                edit(editor, |ed| ed.handle(ev));
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                let ev = coords::touch_event(PointerPhase::Up, &points, *last_touch.read());
                edit(editor, |ed| ed.handle(ev));
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                let ev = coords::touch_event(PointerPhase::Up, &[], *last_touch.read());
                edit(editor, |ed| ed.handle(ev));
            },

            onkeydown: move |evt: Event<KeyboardData>| {
                if let Some(shortcut) = shortcuts::shortcut_for(&evt.key()) {
                    evt.prevent_default();
                    apply_shortcut(editor, show_help, shortcut);
                }
            },

            div {
                class: "scene",
                dangerous_inner_html: "{svg_html}",
            }
        }
    }
}
