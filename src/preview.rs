use anyhow::Result;
use raylib::prelude::*;
use tracing::debug;

use blossoms::Runner;
use blossoms::constants::*;
use blossoms::document::{Document, ElementId, is_displayed};
use blossoms::sim::SimDocument;

const SCROLL_STEP: f32 = 60.0;   // Pixels per mouse wheel notch
const TEXT_SIZE: i32 = 16;

const BOX_COLOR: Color = Color::new(236, 228, 232, 255);
const BORDER_COLOR: Color = Color::new(180, 160, 170, 255);
const MARKED_COLOR: Color = Color::new(244, 143, 177, 255);
const PINK: Color = Color::new(248, 187, 208, 255);
const DARKER_PINK: Color = Color::new(216, 27, 96, 255);

// Classes that mean "this element is on / selected"
const MARKER_CLASSES: [&str; 6] = [ACTIVE_CLASS, IS_ACTIVE_CLASS, IS_VISIBLE_CLASS, VISIBLE_CLASS, SHOW_CLASS, IS_ANIMATED_CLASS];

pub fn run(mut runner: Runner) -> Result<()> {
    let viewport = runner.doc().viewport();
    let (mut rl, thread) = raylib::init()
        .size(viewport.width as i32, viewport.height as i32)
        .title("Blossoms preview")
        .vsync()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Input ---
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            runner.scroll_by(-wheel * SCROLL_STEP);
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let pos = rl.get_mouse_position();
            if let Some(el) = runner.click_at(pos.x, pos.y) {
                debug!(?el, "clicked");
            }
        }

        // --- Update Logic ---
        runner.step(dt);

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        for el in runner.doc().elements() {
            draw_element(&mut d, runner.doc(), el);
        }
    }
    Ok(())
}

fn opacity(doc: &SimDocument, el: ElementId) -> f32 {
    doc.style(el, "opacity").and_then(|v| v.parse().ok()).unwrap_or(1.0)
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn draw_element(d: &mut RaylibDrawHandle, doc: &SimDocument, el: ElementId) {
    let Some(node) = doc.node(el) else { return };
    if !is_displayed(doc, el) || doc.style(el, "visibility").as_deref() == Some("hidden") {
        return;
    }

    let mut alpha = opacity(doc, el);
    let (mut dx, mut dy, mut scale) = (0.0, 0.0, 1.0);
    if let Some(anim) = doc.animation(el) {
        let pose = anim.sample(doc.now_ms(), doc.viewport());
        dx = pose.x;
        dy = pose.y;
        scale = pose.scale;
        alpha *= pose.opacity;
    }
    if alpha <= 0.0 {
        return;
    }

    // Flowers have no layout box: their flight is in viewport coordinates
    if node.classes.iter().any(|c| c == PARTICLE_CLASS) {
        let size: f32 = doc
            .style(el, "width")
            .and_then(|w| w.trim_end_matches("px").parse().ok())
            .unwrap_or(10.0);
        let color = if doc.style(el, "background-color").as_deref() == Some(PARTICLE_COLORS[0]) {
            PINK
        } else {
            DARKER_PINK
        };
        d.draw_circle_v(Vector2::new(dx, dy), size * 0.5 * scale, with_alpha(color, alpha));
        return;
    }

    let rect = node.rect;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let width = rect.width * scale;
    let height = rect.height * scale;
    let x = rect.left + dx + (rect.width - width) * 0.5;
    let y = rect.top - doc.scroll_y() + dy + (rect.height - height) * 0.5;

    let marked = MARKER_CLASSES.iter().any(|m| node.classes.iter().any(|c| c == m));
    let fill = if marked { MARKED_COLOR } else { BOX_COLOR };
    d.draw_rectangle_rec(Rectangle::new(x, y, width, height), with_alpha(fill, alpha * 0.6));
    d.draw_rectangle_lines(x as i32, y as i32, width as i32, height as i32, with_alpha(BORDER_COLOR, alpha));

    let label = if !node.text.is_empty() {
        node.text.clone()
    } else {
        doc.attribute(el, "id").unwrap_or_default()
    };
    if !label.is_empty() {
        d.draw_text(&label, x as i32 + 6, y as i32 + 6, TEXT_SIZE, with_alpha(Color::DARKGRAY, alpha));
    }
}
