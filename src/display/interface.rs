use std::error::Error;

/// A fixed grid of text lines showing the recognizer's published state.
pub trait Display: Send + Sync {
    /// Prepare the output device
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    /// Clear all lines
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line (0-based index)
    /// Returns error if line number is out of range
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Push the written lines out, for displays that buffer a whole frame
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn num_lines(&self) -> usize {
        6
    }

    fn chars_per_line(&self) -> usize {
        40
    }
}

pub fn check_line(display: &dyn Display, line: usize) -> Result<(), Box<dyn Error + Send + Sync>> {
    if line >= display.num_lines() {
        return Err(format!("Invalid line number {}", line).into());
    }
    Ok(())
}

pub fn fit_text(display: &dyn Display, text: &str) -> String {
    text.chars().take(display.chars_per_line()).collect()
}
