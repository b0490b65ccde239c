//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{FrameStats, ghost_trail, monitoring_lines};
use crate::Point;
use crate::settings::Settings;
use crate::sim::{Path, Scene};
use crate::view::View;

const BACKGROUND: &str = "rgb(240,240,255)";
const PATH_COLOR: &str = "#ccccff";
const PATH_WIDTH: f64 = 16.0;
const TEXT_COLOR: &str = "black";
const TEXT_FONT: &str = "10px Arial";
const MONITOR_WIDTH: f64 = 100.0;

pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    pub view: View,
    pub stats: FrameStats,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, view: View) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        context.set_image_smoothing_enabled(false);

        let mut renderer = Self {
            context,
            canvas,
            view,
            stats: FrameStats::default(),
        };
        renderer.resize(view.width, view.height);
        Ok(renderer)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.width = width;
        self.view.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Draw one frame that took `dt` milliseconds since the previous one
    pub fn render(&mut self, scene: &Scene, settings: &Settings, mouse: Point, dt: f64) -> Result<(), JsValue> {
        self.stats.record(dt);

        let (w, h) = (self.view.width as f64, self.view.height as f64);
        self.context.clear_rect(0.0, 0.0, w, h);
        self.context.set_fill_style_str(BACKGROUND);
        self.context.fill_rect(0.0, 0.0, w, h);

        if let Some(path) = scene.current_path() {
            self.draw_path(path);
        }

        for ball in scene.balls() {
            for ghost in ghost_trail(ball, &settings.ghosts) {
                self.draw_disc(ghost.position, ghost.radius, ghost.color.as_str(), ghost.opacity)?;
            }
            self.draw_disc(ball.position(), ball.radius, ball.color.as_str(), 1.0)?;
        }

        if settings.display_monitoring {
            self.draw_monitoring(scene, mouse)?;
        }
        Ok(())
    }

    fn draw_path(&self, path: &Path) {
        let ctx = &self.context;
        ctx.begin_path();
        for (i, &point) in path.points().iter().enumerate() {
            let sc = self.view.screen_coordinates(point);
            if i == 0 {
                ctx.move_to(sc.x, sc.y);
            } else {
                ctx.line_to(sc.x, sc.y);
            }
        }
        if path.is_closed() {
            ctx.close_path();
        }
        ctx.set_line_width(PATH_WIDTH);
        ctx.set_stroke_style_str(PATH_COLOR);
        ctx.stroke();
    }

    fn draw_disc(&self, position: Point, radius: f64, color: &str, opacity: f64) -> Result<(), JsValue> {
        let ctx = &self.context;
        let sc = self.view.screen_coordinates(position);
        let r = radius * self.view.tile_size();
        ctx.set_fill_style_str(color);
        ctx.set_global_alpha(opacity);
        ctx.begin_path();
        ctx.ellipse(sc.x, sc.y, r, r, 0.0, 0.0, TAU)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw_monitoring(&self, scene: &Scene, mouse: Point) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_font(TEXT_FONT);
        ctx.set_fill_style_str(TEXT_COLOR);
        let x = self.view.width as f64 - MONITOR_WIDTH;
        let lines = monitoring_lines(scene.clock_ms(), &self.stats, scene.balls().len(), mouse);
        for (i, line) in lines.iter().enumerate() {
            ctx.fill_text_with_max_width(line, x, 20.0 + 10.0 * i as f64, MONITOR_WIDTH)?;
        }
        Ok(())
    }
}
