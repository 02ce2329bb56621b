use crate::display::interface::{check_line, fit_text, Display};
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Clone)]
struct DisplayWindow {
    display_buffer: Arc<Mutex<Vec<String>>>,
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let display_buffer = self
            .display_buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading("Recognition");
                ui.add_space(12.0);

                let mut rows = display_buffer.iter().filter(|row| !row.is_empty());

                if let Some(status) = rows.next() {
                    ui.label(egui::RichText::new(status).strong().size(20.0));
                    ui.add_space(8.0);
                }

                for row in rows {
                    ui.label(egui::RichText::new(row).monospace().size(16.0));
                }
            });
        });

        // Results arrive from the recognizer thread
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Desktop window mirroring the display lines. Clones share the same lines.
#[derive(Clone)]
pub struct DisplayGui {
    display_buffer: Arc<Mutex<Vec<String>>>,
    pending: Vec<String>,
}

impl DisplayGui {
    pub fn new() -> Self {
        Self {
            display_buffer: Arc::new(Mutex::new(Vec::new())),
            pending: Vec::new(),
        }
    }

    /// Blocks until the window is closed. Must run on the main thread.
    pub fn run_window(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 260.0])
                .with_resizable(false),
            ..Default::default()
        };

        let window = DisplayWindow {
            display_buffer: self.display_buffer.clone(),
        };

        eframe::run_native(
            "Image Recognizer",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl Display for DisplayGui {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.pending = vec![String::new(); self.num_lines()];
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_line(&*self, line)?;
        let text = fit_text(&*self, text);
        if self.pending.len() < self.num_lines() {
            self.pending.resize(self.num_lines(), String::new());
        }
        self.pending[line] = text;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut display_buffer = self
            .display_buffer
            .lock()
            .map_err(|_| "Display buffer lock poisoned")?;
        *display_buffer = self.pending.clone();
        Ok(())
    }
}
