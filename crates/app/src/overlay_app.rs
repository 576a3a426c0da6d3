//! Full-screen selection overlay drawn with egui

use crate::pipeline::{CapturePipeline, SETTLE_DELAY};
use crate::timer::OneShot;
use capture::{Rect, Snapshot};
use crossbeam_channel::Receiver;
use eframe::egui;
use export::{Effect, SaveDestination};
use overlay::render::{FRAME_COLOR, FRAME_WIDTH};
use overlay::surface::CLIPBOARD_DESTINATION;
use overlay::{
    Button, CaptureSurface, CursorShape, Key, Modifiers, OverlayEvent, OverlayScene,
    PointerEvent, ToolbarSize,
};
use parking_lot::Mutex;
use std::sync::Arc;

const HANDLE_RADIUS: f32 = 3.0;
const TIP_FONT_SIZE: f32 = 12.0;

/// Toolbar size assumed before the first measurement.
const INITIAL_TOOLBAR: ToolbarSize = ToolbarSize {
    width: 260,
    height: 32,
};

pub struct OverlayApp {
    surface: CaptureSurface,
    events: Receiver<OverlayEvent>,
    pipeline: Arc<Mutex<CapturePipeline>>,
    snapshot: Snapshot,
    background: Option<egui::TextureHandle>,
    settle: OneShot,
    effect: Option<Effect>,
    /// Context menu position in pixels.
    menu_at: Option<(i32, i32)>,
    /// Areas drawn last frame, in points; presses there belong to egui.
    toolbar_rect: Option<egui::Rect>,
    menu_rect: Option<egui::Rect>,
    toolbar_size: ToolbarSize,
    press_on_ui: bool,
    closing: bool,
}

impl OverlayApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        surface: CaptureSurface,
        events: Receiver<OverlayEvent>,
        pipeline: Arc<Mutex<CapturePipeline>>,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            surface,
            events,
            pipeline,
            snapshot,
            background: None,
            settle: OneShot::new(),
            effect: None,
            menu_at: None,
            toolbar_rect: None,
            menu_rect: None,
            toolbar_size: INITIAL_TOOLBAR,
            press_on_ui: false,
            closing: false,
        }
    }

    fn background(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let snapshot = &self.snapshot;
        self.background
            .get_or_insert_with(|| {
                let size = [snapshot.width() as usize, snapshot.height() as usize];
                let image =
                    egui::ColorImage::from_rgba_unmultiplied(size, snapshot.image.as_raw());
                ctx.load_texture("frozen-screen", image, egui::TextureOptions::NEAREST)
            })
            .id()
    }

    fn over_ui(&self, pos: egui::Pos2) -> bool {
        self.toolbar_rect.map_or(false, |r| r.contains(pos))
            || self.menu_rect.map_or(false, |r| r.contains(pos))
    }

    /// Feed egui input to the surface in physical pixels.
    fn forward_input(&mut self, ctx: &egui::Context) {
        let ppp = ctx.pixels_per_point();
        let to_px = |pos: egui::Pos2| ((pos.x * ppp).round() as i32, (pos.y * ppp).round() as i32);

        let (events, double_click, pointer) = ctx.input(|i| {
            (
                i.events.clone(),
                i.pointer.button_double_clicked(egui::PointerButton::Primary),
                i.pointer.interact_pos(),
            )
        });

        for event in events {
            let translated = match event {
                egui::Event::PointerMoved(pos) => {
                    let (x, y) = to_px(pos);
                    Some(PointerEvent::Move { x, y })
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    if pressed && self.menu_at.is_some() && !self.over_ui(pos) {
                        self.menu_at = None;
                        self.press_on_ui = true;
                        continue;
                    }
                    if pressed {
                        self.press_on_ui = self.over_ui(pos);
                    }
                    if self.press_on_ui {
                        continue;
                    }
                    let (x, y) = to_px(pos);
                    let button = convert_button(button);
                    Some(if pressed {
                        PointerEvent::Press { x, y, button }
                    } else {
                        PointerEvent::Release { x, y, button }
                    })
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    self.forward_key(convert_key(key), convert_modifiers(modifiers));
                    None
                }
                egui::Event::Copy => {
                    let modifiers = ctx.input(|i| i.modifiers);
                    self.forward_key(Key::C, convert_modifiers(modifiers));
                    None
                }
                _ => None,
            };

            if let Some(event) = translated {
                if let Err(e) = self.surface.on_pointer_event(event) {
                    log::warn!("[OVERLAY] Dropped pointer event: {}", e);
                }
            }
        }

        if double_click && !self.press_on_ui {
            if let Some(pos) = pointer {
                let (x, y) = to_px(pos);
                let event = PointerEvent::DoubleClick {
                    x,
                    y,
                    button: Button::Primary,
                };
                if let Err(e) = self.surface.on_pointer_event(event) {
                    log::warn!("[OVERLAY] Dropped pointer event: {}", e);
                }
            }
        }
    }

    fn forward_key(&mut self, key: Key, modifiers: Modifiers) {
        if key == Key::Other {
            return;
        }
        if let Err(e) = self.surface.on_key_event(key, modifiers) {
            log::warn!("[OVERLAY] Dropped key event: {}", e);
        }
    }

    fn handle_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                OverlayEvent::SaveRequested { index } => self.start_save(ctx, index),
                OverlayEvent::Cancelled => {
                    log::info!("[OVERLAY] Selection cancelled");
                    self.close(ctx);
                }
                OverlayEvent::ContextMenu { x, y } => self.menu_at = Some((x, y)),
                OverlayEvent::Placed(rect) => {
                    log::debug!("[OVERLAY] Placed {:?}", rect);
                }
                OverlayEvent::SelectionChanged(_) => {}
            }
        }
    }

    fn start_save(&mut self, ctx: &egui::Context, index: Option<usize>) {
        let mut pipeline = self.pipeline.lock();
        pipeline.set_effect(self.effect);
        if !pipeline.request_save(index) {
            return;
        }
        if pipeline.will_prompt() {
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
                egui::WindowLevel::Normal,
            ));
        }
        self.menu_at = None;
        self.surface.freeze();
        self.settle.start(SETTLE_DELAY);
    }

    fn run_pipeline(&mut self, ctx: &egui::Context) {
        match self.surface.committed_rect() {
            Ok(rect) => {
                let mut pipeline = self.pipeline.lock();
                if let Ok(outcome) = pipeline.run(Some(rect)) {
                    log::info!("[OVERLAY] Saved: {:?}", outcome);
                }
            }
            Err(e) => {
                log::warn!("[OVERLAY] Nothing to capture: {}", e);
                self.pipeline.lock().finish();
            }
        }
        self.close(ctx);
    }

    fn close(&mut self, ctx: &egui::Context) {
        self.closing = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn paint_scene(&mut self, ctx: &egui::Context, scene: &OverlayScene) {
        let ppp = ctx.pixels_per_point();
        let texture = self.background(ctx);
        let image_size = egui::vec2(self.snapshot.width() as f32, self.snapshot.height() as f32);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter();
                let screen = ctx.screen_rect();
                painter.image(
                    texture,
                    screen,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                for band in &scene.mask {
                    let alpha = (band.opacity * 255.0).round() as u8;
                    painter.rect_filled(
                        to_points(&band.rect, ppp),
                        0.0,
                        egui::Color32::from_black_alpha(alpha),
                    );
                }

                let frame_color = egui::Color32::from_rgb(FRAME_COLOR[0], FRAME_COLOR[1], FRAME_COLOR[2]);
                if let Some(frame) = &scene.frame {
                    painter.rect_stroke(
                        to_points(frame, ppp),
                        0.0,
                        egui::Stroke::new(FRAME_WIDTH as f32 / ppp, frame_color),
                    );
                }

                for &(x, y) in &scene.handles {
                    painter.circle_filled(
                        egui::pos2(x as f32 / ppp, y as f32 / ppp),
                        HANDLE_RADIUS,
                        frame_color,
                    );
                }

                if let Some(tip) = &scene.size_tip {
                    painter.text(
                        egui::pos2(tip.x as f32 / ppp, tip.y as f32 / ppp - 2.0),
                        egui::Align2::LEFT_BOTTOM,
                        &tip.text,
                        egui::FontId::proportional(TIP_FONT_SIZE),
                        egui::Color32::WHITE,
                    );
                }

                if let Some(magnifier) = &scene.magnifier {
                    let target = to_points(&magnifier.target, ppp);
                    let source = &magnifier.source;
                    let uv = egui::Rect::from_min_max(
                        egui::pos2(source.x as f32 / image_size.x, source.y as f32 / image_size.y),
                        egui::pos2(
                            source.right() as f32 / image_size.x,
                            source.bottom() as f32 / image_size.y,
                        ),
                    );
                    painter.image(texture, target, uv, egui::Color32::WHITE);
                    painter.rect_stroke(target, 0.0, egui::Stroke::new(1.0, frame_color));
                    let centre = target.center();
                    let cross = egui::Stroke::new(1.0, frame_color);
                    painter.hline(target.x_range(), centre.y, cross);
                    painter.vline(centre.x, target.y_range(), cross);
                }
            });
    }

    fn show_toolbar(&mut self, ctx: &egui::Context, anchor: Option<(i32, i32)>) {
        let Some((x, y)) = anchor else {
            self.toolbar_rect = None;
            return;
        };
        let ppp = ctx.pixels_per_point();

        let response = egui::Area::new(egui::Id::new("toolbar"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(x as f32 / ppp, y as f32 / ppp))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for effect in [Effect::Blur, Effect::Mosaic] {
                            let selected = self.effect == Some(effect);
                            if ui.selectable_label(selected, effect_label(effect)).clicked() {
                                self.effect = if selected { None } else { Some(effect) };
                            }
                        }
                        ui.separator();
                        if ui.button("Save").clicked() {
                            publish(self.surface.request_save(None));
                        }
                        if ui.button("Copy").clicked() {
                            publish(self.surface.request_save(Some(CLIPBOARD_DESTINATION)));
                        }
                        if ui.button("Exit").clicked() {
                            publish(self.surface.cancel());
                        }
                    });
                });
            })
            .response;

        self.toolbar_rect = Some(response.rect);
        self.toolbar_size = ToolbarSize {
            width: (response.rect.width() * ppp).round() as i32,
            height: (response.rect.height() * ppp).round() as i32,
        };
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        let Some((x, y)) = self.menu_at else {
            self.menu_rect = None;
            return;
        };
        let ppp = ctx.pixels_per_point();

        let response = egui::Area::new(egui::Id::new("context-menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(x as f32 / ppp, y as f32 / ppp))
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    for destination in SaveDestination::ALL {
                        if ui.button(destination.label()).clicked() {
                            publish(self.surface.request_save(Some(destination.index() as usize)));
                        }
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        publish(self.surface.cancel());
                    }
                });
            })
            .response;

        self.menu_rect = Some(response.rect);
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closing {
            return;
        }

        self.forward_input(ctx);
        self.handle_events(ctx);

        if self.settle.fire_if_due() {
            self.run_pipeline(ctx);
            return;
        }

        let scene = self.surface.scene(self.toolbar_size);
        self.paint_scene(ctx, &scene);
        if self.surface.is_frozen() {
            self.toolbar_rect = None;
            self.menu_rect = None;
        } else {
            self.show_toolbar(ctx, scene.toolbar);
            self.show_menu(ctx);
        }
        // Events published by toolbar clicks this frame.
        self.handle_events(ctx);

        ctx.set_cursor_icon(cursor_icon(scene.cursor));

        if let Some(left) = self.settle.remaining_at(std::time::Instant::now()) {
            ctx.request_repaint_after(left);
        }
    }
}

fn publish(result: overlay::OverlayResult<()>) {
    if let Err(e) = result {
        log::warn!("[OVERLAY] {}", e);
    }
}

fn to_points(rect: &Rect, ppp: f32) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32 / ppp, rect.y as f32 / ppp),
        egui::vec2(rect.width as f32 / ppp, rect.height as f32 / ppp),
    )
}

fn effect_label(effect: Effect) -> &'static str {
    match effect {
        Effect::Blur => "Blur",
        Effect::Mosaic => "Mosaic",
    }
}

fn convert_button(button: egui::PointerButton) -> Button {
    match button {
        egui::PointerButton::Primary => Button::Primary,
        egui::PointerButton::Secondary => Button::Secondary,
        _ => Button::Other,
    }
}

fn convert_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::ArrowUp => Key::Up,
        egui::Key::ArrowDown => Key::Down,
        egui::Key::Escape => Key::Escape,
        egui::Key::S => Key::S,
        egui::Key::C => Key::C,
        _ => Key::Other,
    }
}

fn convert_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.command,
        shift: modifiers.shift,
        alt: modifiers.alt,
    }
}

fn cursor_icon(shape: CursorShape) -> egui::CursorIcon {
    match shape {
        CursorShape::Crosshair => egui::CursorIcon::Crosshair,
        CursorShape::Arrow => egui::CursorIcon::Default,
        CursorShape::SizeFDiag => egui::CursorIcon::ResizeNwSe,
        CursorShape::SizeBDiag => egui::CursorIcon::ResizeNeSw,
        CursorShape::SizeHor => egui::CursorIcon::ResizeHorizontal,
        CursorShape::SizeVer => egui::CursorIcon::ResizeVertical,
        CursorShape::OpenHand => egui::CursorIcon::Grab,
        CursorShape::ClosedHand => egui::CursorIcon::Grabbing,
    }
}
