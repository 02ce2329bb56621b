use crate::display::interface::{check_line, fit_text, Display};
use std::error::Error;

/// Keeps the last flushed frame in memory.
#[derive(Default)]
pub struct DisplayFake {
    buffer: Vec<String>,
    frames: Vec<Vec<String>>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty lines of the last flushed frame.
    pub fn lines(&self) -> Vec<String> {
        self.frames
            .last()
            .map(|frame| frame.iter().filter(|l| !l.is_empty()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Display for DisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer = vec![String::new(); self.num_lines()];
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_line(&*self, line)?;
        let text = fit_text(&*self, text);
        if self.buffer.len() < self.num_lines() {
            self.buffer.resize(self.num_lines(), String::new());
        }
        self.buffer[line] = text;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.frames.push(self.buffer.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_flush() {
        let mut display = DisplayFake::new();

        display.clear().unwrap();
        display.write_line(0, "hello").unwrap();
        display.write_line(2, "world").unwrap();
        display.flush().unwrap();

        assert_eq!(display.lines(), vec!["hello", "world"]);
        assert_eq!(display.frame_count(), 1);
    }

    #[test]
    fn test_invalid_line() {
        let mut display = DisplayFake::new();

        assert!(display.write_line(6, "nope").is_err());
    }

    #[test]
    fn test_long_text_is_cut() {
        let mut display = DisplayFake::new();

        display.write_line(0, &"x".repeat(100)).unwrap();
        display.flush().unwrap();

        assert_eq!(display.lines()[0].len(), 40);
    }
}
