use clap::{Parser, ValueEnum};
use config::Config;
use display::{impl_console::DisplayConsole, impl_gui::DisplayGui, interface::Display};
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::{CropAndScale, ImageClassifier};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use recognizer::bitmap::Bitmap;
use recognizer::main::Recognizer;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod config;
mod display;
mod image_classifier;
mod library;
mod recognizer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CropArg {
    Center,
    Fit,
    Fill,
}

impl From<CropArg> for CropAndScale {
    fn from(crop: CropArg) -> Self {
        match crop {
            CropArg::Center => CropAndScale::CenterCrop,
            CropArg::Fit => CropAndScale::ScaleFit,
            CropArg::Fill => CropAndScale::ScaleFill,
        }
    }
}

/// Classify a photo with a pretrained MobileNetV2 model.
#[derive(Parser, Debug)]
#[command(name = "image-recognizer", version)]
struct Args {
    /// Image to classify. Paths are read from stdin, one per line, when omitted.
    image: Option<PathBuf>,

    /// ONNX model file
    #[arg(long)]
    model: Option<PathBuf>,

    /// Label file, one label per line in model output order
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Side of the square model input
    #[arg(long)]
    input_size: Option<u32>,

    /// How the image is fitted to the model input
    #[arg(long, value_enum, default_value_t = CropArg::Center)]
    crop: CropArg,

    /// How long a result stays up before offering another image
    #[arg(long)]
    retry_delay_ms: Option<u64>,

    /// Give up waiting for a result after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Use simulated results instead of loading a model
    #[arg(long)]
    preview: bool,

    /// Show results in a window instead of the terminal
    #[arg(long)]
    gui: bool,
}

impl Args {
    fn to_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(model) = &self.model {
            config.model.onnx_model_path = model.clone();
        }
        if let Some(labels) = &self.labels {
            config.model.labels_path = labels.clone();
        }
        if let Some(size) = self.input_size {
            config.model.input_shape = (size, size);
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry_delay = Duration::from_millis(delay);
        }
        config.crop_and_scale = self.crop.into();
        config
    }
}

fn load_image_classifier(
    args: &Args,
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, BoxError> {
    if args.preview {
        return Ok(Arc::new(ImageClassifierFake::random(logger)));
    }

    let image_classifier = ImageClassifierTractOnnx::load(&config.model, logger)?;

    Ok(Arc::new(image_classifier))
}

fn recognize_file(
    recognizer: &mut Recognizer,
    path: &Path,
    timeout: Duration,
) -> Result<(), BoxError> {
    let image =
        image::open(path).map_err(|e| format!("Could not open {}: {}", path.display(), e))?;

    recognizer.classify(Bitmap::from(image));

    if !recognizer.wait(timeout) {
        return Err(format!("No result after {:?}", timeout).into());
    }

    match recognizer.observed().error_message {
        Some(error_message) => Err(error_message.into()),
        None => Ok(()),
    }
}

fn offer_retry(recognizer: &Recognizer) {
    std::thread::sleep(recognizer.retry_delay_remaining());
    recognizer.refresh();
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn run_session(
    recognizer: &mut Recognizer,
    logger: &Arc<dyn Logger + Send + Sync>,
    image: Option<PathBuf>,
    timeout: Duration,
) -> Result<(), BoxError> {
    if let Some(path) = image {
        return recognize_file(recognizer, &path, timeout);
    }

    print!("> ");
    std::io::stdout().flush()?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        if let Err(e) = recognize_file(recognizer, Path::new(path), timeout) {
            let _ = logger.error(&e.to_string());
        }
        offer_retry(recognizer);
    }

    Ok(())
}

fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    let config = args.to_config();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier = load_image_classifier(&args, &config, logger.clone());

    let timeout = Duration::from_secs(args.timeout_secs);

    if !args.gui {
        let display: Arc<Mutex<dyn Display + Send + Sync>> =
            Arc::new(Mutex::new(DisplayConsole::new()));

        let mut recognizer = Recognizer::new(config, logger.clone(), image_classifier, display);

        return run_session(&mut recognizer, &logger, args.image, timeout);
    }

    let window = DisplayGui::new();
    let display: Arc<Mutex<dyn Display + Send + Sync>> = Arc::new(Mutex::new(window.clone()));

    let session_logger = logger.clone();
    let image = args.image.clone();
    std::thread::spawn(move || {
        let mut recognizer =
            Recognizer::new(config, session_logger.clone(), image_classifier, display);
        if let Err(e) = run_session(&mut recognizer, &session_logger, image, timeout) {
            let _ = session_logger.error(&e.to_string());
        }
    });

    // The window owns the main thread until it is closed
    window.run_window()
}
