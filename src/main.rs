use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use digit_canvas::api;
use digit_canvas::models::{AppConfig, RgbaCanvas};
use digit_canvas::rendering::decode_rgba;
use digit_canvas::server;
use digit_canvas::services::{
    rank_predictions, CanvasOptions, CanvasPipeline, Classifier, DenseModel, Prediction,
};
use digit_downsample::TensorShape;

#[derive(Parser)]
#[command(name = "digit-canvas")]
#[command(about = "Downsample handwritten digit canvases into classifier input")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the normalized tensor for a PNG canvas as JSON
    Preprocess {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Block size (default: configured canvas.scale)
        #[arg(short, long)]
        scale: Option<u32>,

        /// Tensor layout: "image" or "flat" (default: configured canvas.shape)
        #[arg(long)]
        shape: Option<TensorShape>,
    },
    /// Render what the classifier sees as a PNG
    Pixelize {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Block size (default: configured canvas.scale)
        #[arg(short, long)]
        scale: Option<u32>,
    },
    /// Classify a PNG canvas and print ranked predictions
    Predict {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Model weights JSON (default: configured model.path)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Block size (default: configured canvas.scale)
        #[arg(short, long)]
        scale: Option<u32>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Digit Canvas API",
        description = "Downsamples drawn digit canvases into classifier input",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_canvas,
        api::handle_preprocess,
        api::handle_pixelize,
        api::handle_predict,
    ),
    components(schemas(
        api::CanvasRequest,
        api::CanvasResponse,
        api::PreprocessResponse,
        api::PredictResponse,
        digit_canvas::services::Prediction,
    )),
    tags(
        (name = "Canvas", description = "Canvas geometry and preprocessing"),
        (name = "Classifier", description = "Digit classification")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Preprocess {
            input,
            scale,
            shape,
        }) => run_preprocess_command(&input, CanvasOptions { scale, shape }),
        Some(Commands::Pixelize {
            input,
            output,
            scale,
        }) => run_pixelize_command(&input, &output, scale),
        Some(Commands::Predict {
            input,
            model,
            scale,
        }) => run_predict_command(&input, model, scale).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "digit_canvas=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn read_canvas(path: &Path) -> anyhow::Result<RgbaCanvas> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    Ok(decode_rgba(&bytes)?)
}

/// Print the tensor for a PNG canvas (no server needed)
fn run_preprocess_command(input: &Path, options: CanvasOptions) -> anyhow::Result<()> {
    init_cli_tracing();

    let response = preprocess_file(&AppConfig::from_env(), input, options)?;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}

fn preprocess_file(
    config: &AppConfig,
    input: &Path,
    options: CanvasOptions,
) -> anyhow::Result<api::PreprocessResponse> {
    let pipeline = CanvasPipeline::new(config.canvas.clone());
    let canvas = read_canvas(input)?;

    let tensor = pipeline.preprocess(&canvas, options)?;
    Ok(api::PreprocessResponse::from_tensor(&tensor))
}

/// Write the pixelized preview of a PNG canvas
fn run_pixelize_command(input: &Path, output: &Path, scale: Option<u32>) -> anyhow::Result<()> {
    init_cli_tracing();

    let written = pixelize_file(&AppConfig::from_env(), input, output, scale)?;
    println!("Rendered {} ({written} bytes)", output.display());

    Ok(())
}

/// Returns the number of bytes written to `output`
fn pixelize_file(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    scale: Option<u32>,
) -> anyhow::Result<usize> {
    let pipeline = CanvasPipeline::new(config.canvas.clone());
    let canvas = read_canvas(input)?;

    let options = CanvasOptions { scale, shape: None };
    let png_bytes = pipeline.render_preview(&canvas, options)?;

    std::fs::write(output, &png_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;
    Ok(png_bytes.len())
}

/// Classify a PNG canvas with a model loaded from disk
async fn run_predict_command(
    input: &Path,
    model: Option<PathBuf>,
    scale: Option<u32>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let predictions = predict_file(&AppConfig::from_env(), input, model, scale).await?;
    if predictions.is_empty() {
        println!("No digit scored above zero");
    }
    for prediction in &predictions {
        println!("{}: {}%", prediction.digit, prediction.probability);
    }

    Ok(())
}

/// `model` takes precedence over the configured `model.path`
async fn predict_file(
    config: &AppConfig,
    input: &Path,
    model: Option<PathBuf>,
    scale: Option<u32>,
) -> anyhow::Result<Vec<Prediction>> {
    let model_path = model
        .or_else(|| config.model.path.clone())
        .ok_or_else(|| anyhow::anyhow!("No model given. Use --model or set MODEL_FILE"))?;
    let classifier = DenseModel::load(&model_path)?;

    let pipeline = CanvasPipeline::new(config.canvas.clone());
    let canvas = read_canvas(input)?;
    let options = CanvasOptions { scale, shape: None };
    let tensor = pipeline.preprocess(&canvas, options)?;

    Ok(rank_predictions(&classifier.predict(&tensor).await?))
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let model_file = std::env::var("MODEL_FILE").ok();

    // Header
    println!("Digit Canvas v{VERSION}");
    println!("Handwritten digit canvas preprocessing server\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  MODEL_FILE  = {}",
        model_file.as_deref().unwrap_or("(not set)")
    );

    // Effective configuration section
    let config = AppConfig::from_env();
    let spec = config.canvas.spec();
    println!("\nCanvas:");
    println!(
        "  Size:   {}x{} ({} cells at scale {})",
        spec.width(),
        spec.height(),
        spec.grid,
        spec.scale
    );
    println!(
        "  Pen:    {} px ({} cells)",
        spec.stroke_width(),
        spec.line_width
    );
    println!("  Tensor: {}", config.canvas.shape);
    println!(
        "  Model:  {}",
        config
            .model_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );

    // Commands section
    println!("\nCommands:");
    println!("  digit-canvas serve        Start the HTTP server");
    println!("  digit-canvas preprocess   Print the tensor for a PNG canvas");
    println!("  digit-canvas pixelize     Render the downsampled preview");
    println!("  digit-canvas predict      Classify a PNG canvas");
    println!("\nRun 'digit-canvas --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "digit_canvas=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();
    let spec = config.canvas.spec();

    tracing::info!(
        width = spec.width(),
        height = spec.height(),
        scale = spec.scale,
        shape = %config.canvas.shape,
        model = ?config.model_path().map(|p| p.display().to_string()),
        "Canvas configured"
    );

    // Create application state using shared server module
    let state = server::create_app_state(&config)?;
    if state.classifier.is_some() {
        tracing::info!("Classifier ready");
    }

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Digit canvas server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
