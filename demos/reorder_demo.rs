#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_reorder::{
    Document, DocumentSplitter, DragController, DragEvent, DragMode, DragOptions, Granularity,
    MonospaceLayout, NodeId, Surface as _,
};

const ROW_HEIGHT: f32 = 28.0;

struct App {
    drag: DragController<Document>,
    layout: MonospaceLayout,
    last_event: Option<DragEvent>,
    events: std::sync::mpsc::Receiver<DragEvent>,
}

fn sample_document() -> Document {
    let mut doc = Document::new("div");
    let container = doc.container();
    for text in [
        "Drag a line by pressing anywhere on it.",
        "Drop near the top or bottom edge to reorder,",
        "or over the text to split the line around it.",
        "Hold CTRL when starting to copy instead of move.",
        "Escape cancels.",
    ] {
        doc.append_element_with_text(container, "p", text)
            .expect("the container is an element");
    }
    doc
}

impl App {
    fn new(granularity: Granularity) -> Self {
        let layout = MonospaceLayout {
            glyph_width: 9.0,
            line_height: 18.0,
            padding: egui::vec2(6.0, 5.0),
        };
        let options = DragOptions {
            granularity,
            debug_event_log: true,
            ..Default::default()
        };
        let mut drag = DragController::new_with_options(
            sample_document(),
            layout,
            DocumentSplitter,
            options,
        );
        let (tx, rx) = std::sync::mpsc::channel();
        drag.add_listener(move |event: &DragEvent| {
            tx.send(*event).ok();
        });
        Self {
            drag,
            layout,
            last_event: None,
            events: rx,
        }
    }

    /// Assign every child a row below `origin` and return `(child, rect)` pairs.
    fn lay_out(&mut self, origin: egui::Pos2, width: f32) -> Vec<(NodeId, egui::Rect)> {
        let doc = &mut self.drag.surface;
        doc.set_origin(Some(origin));
        let children = doc.children(doc.container()).to_vec();
        children
            .into_iter()
            .enumerate()
            .map(|(i, child)| {
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, i as f32 * ROW_HEIGHT),
                    egui::vec2(width, ROW_HEIGHT - 2.0),
                );
                doc.set_rect(child, rect);
                (child, rect)
            })
            .collect()
    }

    fn paint_rows(&self, ui: &egui::Ui, rows: &[(NodeId, egui::Rect)]) {
        let painter = ui.painter();
        let visuals = ui.visuals();
        let font = egui::FontId::monospace(14.0);
        for &(child, rect) in rows {
            let fill = if self.drag.surface.has_marker(child, "dragging") {
                visuals.selection.bg_fill.gamma_multiply(0.4)
            } else {
                visuals.faint_bg_color
            };
            painter.rect_filled(rect, 3.0, fill);

            let Ok(chars) = self.layout.place_chars(&self.drag.surface, child) else {
                continue;
            };
            for c in chars {
                painter.text(
                    c.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    c.ch,
                    font.clone(),
                    visuals.text_color(),
                );
            }
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, rows: &[(NodeId, egui::Rect)]) {
        let (pressed, released, pos, escape, ctrl) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.key_pressed(egui::Key::Escape),
                i.modifiers.ctrl,
            )
        });
        let hovered = pos.and_then(|pos| {
            rows.iter()
                .find(|(_, rect)| rect.contains(pos))
                .map(|&(child, _)| (child, pos))
        });

        if pressed {
            if let Some((child, _)) = hovered {
                let mode = if ctrl { DragMode::Copy } else { DragMode::Move };
                self.drag.begin(child, mode);
            }
        }
        if let Some((child, pos)) = hovered {
            self.drag.update(child, pos);
        }
        if escape {
            self.drag.cancel();
        }
        if released {
            self.drag.commit();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(event) = self.events.try_iter().last() {
            self.last_event = Some(event);
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.drag.cancel();
                    self.drag.surface = sample_document();
                }
                ui.radio_value(
                    &mut self.drag.options.granularity,
                    Granularity::Character,
                    "Character",
                );
                ui.radio_value(
                    &mut self.drag.options.granularity,
                    Granularity::Element,
                    "Element",
                );
                if let Some(event) = self.last_event {
                    ui.label(format!("last event: {event:?}"));
                }
            });
        });

        egui::TopBottomPanel::bottom("log")
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                    ui.monospace(self.drag.debug_log_text());
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let rows = self.lay_out(available.min, available.width());
            self.handle_pointer(ctx, &rows);
            self.paint_rows(ui, &rows);
            self.drag.show(ui);
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 420.0])
            .with_title("egui_reorder: demo"),
        ..Default::default()
    };
    eframe::run_native(
        "egui_reorder: demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(Granularity::Character)))),
    )
}
