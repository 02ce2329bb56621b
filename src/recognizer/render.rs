use crate::display::interface::Display;
use crate::recognizer::observed::Observed;
use std::sync::{Arc, Mutex};

pub const RETRY_TEXT: &str = "Pick another image to try again";

#[derive(Clone)]
pub struct Render {
    display: Arc<Mutex<dyn Display + Send + Sync>>,
}

impl Render {
    pub fn new(display: Arc<Mutex<dyn Display + Send + Sync>>) -> Self {
        Self { display }
    }

    pub fn render(
        &self,
        observed: &Observed,
        retry_ready: bool,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut display = self
            .display
            .lock()
            .map_err(|_| "Display lock poisoned")?;

        let mut lines = vec![observed.result.clone()];
        lines.extend(observed.predictions.iter().cloned());
        if let Some(error_message) = &observed.error_message {
            lines.push(error_message.clone());
        }
        if retry_ready {
            lines.push(RETRY_TEXT.to_string());
        }

        display.clear()?;

        for (index, text) in lines.iter().take(display.num_lines()).enumerate() {
            display.write_line(index, text)?;
        }

        display.flush()?;

        Ok(())
    }
}
