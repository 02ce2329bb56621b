use crate::display::interface::{check_line, fit_text, Display};
use std::error::Error;

pub struct DisplayConsole {
    display_buffer: Vec<String>,
}

impl DisplayConsole {
    pub fn new() -> Self {
        Self {
            display_buffer: Vec::new(),
        }
    }

    fn render_display(&self) {
        let width = self.chars_per_line();
        println!("┌{}┐", "─".repeat(width));
        for row in &self.display_buffer {
            println!("│{:<width$}│", row, width = width);
        }
        println!("└{}┘", "─".repeat(width));
    }
}

impl Display for DisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.display_buffer = vec![String::new(); self.num_lines()];
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_line(&*self, line)?;
        let text = fit_text(&*self, text);
        if self.display_buffer.len() < self.num_lines() {
            self.display_buffer.resize(self.num_lines(), String::new());
        }
        self.display_buffer[line] = text;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
        Ok(())
    }
}
