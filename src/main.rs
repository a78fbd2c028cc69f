/*
 * Node Network
 *
 * Runs the node network backdrop in a nannou window. The window stands in
 * for the page hero: the engine is mounted on it, window resizes are
 * forwarded to the engine, and nannou's per-refresh update delivers the
 * scheduled frames.
 *
 * Usage: node-network [config.json] [--debug]
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use node_network::{ui, DebugInfo, Engine, NannouCanvas, NetworkParams};

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

struct Model {
    engine: Engine<NannouCanvas>,
    egui: Option<Egui>,
    debug_info: DebugInfo,
    show_debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model)
        .update(update)
        .exit(exit)
        .run();
}

// Params from the first non-flag argument, falling back to defaults
fn load_params() -> NetworkParams {
    match std::env::args().skip(1).find(|arg| !arg.starts_with("--")) {
        Some(path) => match NetworkParams::load(&path) {
            Ok(params) => {
                log::info!("loaded params from {}", path);
                params
            }
            Err(e) => {
                log::error!("{}; using default params", e);
                NetworkParams::default()
            }
        },
        None => NetworkParams::default(),
    }
}

fn model(app: &App) -> Model {
    let params = load_params();
    let show_debug = std::env::args().any(|arg| arg == "--debug");

    // The hero surface has a fixed height; open the window at that height
    let window_height = params
        .surface_height
        .map(|height| height.round() as u32)
        .unwrap_or(DEFAULT_HEIGHT);

    let window = app
        .new_window()
        .title("Node Network")
        .size(DEFAULT_WIDTH, window_height)
        .view(view)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .map_err(|e| log::error!("failed to open window: {}", e))
        .ok()
        .and_then(|id| app.window(id));

    let egui = window.as_ref().map(|window| Egui::from_window(window));

    let (width, height) = window
        .as_ref()
        .map(|window| window.inner_size_points())
        .unwrap_or((0.0, 0.0));
    let canvas = window
        .as_ref()
        .map(|_| NannouCanvas::new(Draw::new(), Rect::from_w_h(width, height)));

    let mut engine = Engine::new(params);
    // A missing surface is already logged by the engine; the app keeps running and draws nothing
    let _ = engine.mount(canvas, width, height);

    Model {
        engine,
        egui,
        debug_info: DebugInfo::default(),
        show_debug,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.engine.on_refresh();

    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.stats = model.engine.stats();
    model.debug_info.loop_state = model.engine.state();
    model.debug_info.bounds = model.engine.bounds();
    model.debug_info.field = model.engine.field();

    if model.show_debug {
        if let Some(egui) = model.egui.as_mut() {
            egui.set_elapsed_time(update.since_start);
            ui::update_ui(egui, model.engine.params(), &model.debug_info);
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    match model.engine.canvas() {
        Some(canvas) => {
            if let Err(e) = canvas.draw().to_frame(app, &frame) {
                log::error!("failed to render node network: {:?}", e);
            }
        }
        None => frame.clear(BLACK),
    }

    if model.show_debug {
        if let Some(egui) = model.egui.as_ref() {
            if let Err(e) = egui.draw_to_frame(&frame) {
                log::error!("failed to draw debug overlay: {:?}", e);
            }
        }
    }
}

// Forward window resizes to the engine and re-anchor the canvas
fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.engine.resize(size.x, size.y);
    if let Some(canvas) = model.engine.canvas_mut() {
        canvas.set_viewport(Rect::from_w_h(size.x, size.y));
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    if let Some(egui) = model.egui.as_mut() {
        egui.handle_raw_event(event);
    }
}

fn exit(_app: &App, mut model: Model) {
    model.engine.unmount();
}
