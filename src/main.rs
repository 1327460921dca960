use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use photo_polish::api;
use photo_polish::models::AppConfig;
use photo_polish::server;
use photo_polish::services::{polisher_from_config, EnhancementService};
use pixel_enhance::{EnhancementLevel, PipelineMode, StagePlan};

#[derive(Parser)]
#[command(name = "photo-polish")]
#[command(about = "Photo Polish - level-driven photo enhancement")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Config file (falls back to CONFIG_FILE)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Enhance a PNG file
    Enhance {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Enhancement level 0-100 (default from config)
        #[arg(short, long)]
        level: Option<u8>,

        /// Never call remote polish, even above level 75
        #[arg(long)]
        local_only: bool,

        /// Config file (falls back to CONFIG_FILE)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the stages and parameters used for a level
    Plan {
        /// Enhancement level 0-100
        #[arg(short, long)]
        level: u8,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Photo Polish API",
        description = "Level-driven photo enhancement with optional remote polish",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_enhance, api::handle_enhance_png),
    components(schemas(api::EnhanceRequest, api::EnhanceResponse)),
    tags(
        (name = "Enhance", description = "Image enhancement")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { config }) => run_server(config).await,
        Some(Commands::Enhance {
            input,
            output,
            level,
            local_only,
            config,
        }) => run_enhance_command(&input, &output, level, local_only, config).await,
        Some(Commands::Plan { level }) => run_plan_command(level),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Explicit path wins, then CONFIG_FILE.
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

/// Enhance a PNG file directly (no server needed)
async fn run_enhance_command(
    input: &Path,
    output: &Path,
    level: Option<u8>,
    local_only: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_polish=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config_path(config).as_deref());
    let level = match level {
        Some(level) => EnhancementLevel::new(level)?,
        None => EnhancementLevel::saturating(config.default_level),
    };

    let polisher = polisher_from_config(&config.remote_polish)?;
    let codec = photo_polish::rendering::PngCodec::new(config.optimize_png);
    let service = EnhancementService::new(polisher, codec).remote_polish(!local_only);

    let png = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let encoded = service.enhance_png(png, level).await?;

    std::fs::write(output, &encoded.png)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", output.display()))?;

    if let Some(warning) = encoded.remote.warning() {
        eprintln!("Warning: {warning}");
    }

    println!(
        "Enhanced {}x{} at level {} ({}, remote {}) -> {} ({} bytes)",
        encoded.width,
        encoded.height,
        level,
        encoded.mode.as_str(),
        encoded.remote.as_str(),
        output.display(),
        encoded.png.len()
    );

    Ok(())
}

/// Print the stage plan for a level
fn run_plan_command(level: u8) -> anyhow::Result<()> {
    let level = EnhancementLevel::new(level)?;
    print!("{}", describe_plan(&StagePlan::for_level(level)));
    Ok(())
}

fn describe_plan(plan: &StagePlan) -> String {
    let mut out = format!(
        "Level {} (factor {:.2}): {}\n",
        plan.level,
        plan.level.factor(),
        plan.mode().as_str()
    );

    match &plan.denoise {
        Some(d) if d.radius == 0 => out.push_str("  denoise   radius 0 (no-op)\n"),
        Some(d) => out.push_str(&format!("  denoise   radius {}\n", d.radius)),
        None => out.push_str("  denoise   skipped\n"),
    }
    match &plan.sharpen {
        Some(s) => out.push_str(&format!("  sharpen   centre weight {:.2}\n", s.center_weight)),
        None => out.push_str("  sharpen   skipped\n"),
    }
    out.push_str(&format!(
        "  tonal     brightness {:.3}, contrast {:.3}\n",
        plan.tonal.brightness, plan.tonal.contrast
    ));
    out.push_str(&format!(
        "  vibrance  saturation {:.3}\n",
        plan.vibrance.saturation
    ));
    match &plan.edge {
        Some(e) => out.push_str(&format!("  edge      strength {:.3}\n", e.strength)),
        None => out.push_str("  edge      skipped\n"),
    }
    if plan.mode() == PipelineMode::LocalPlusRemote {
        out.push_str(&format!(
            "  remote    polish at intensity {}\n",
            pixel_enhance::REMOTE_POLISH_INTENSITY
        ));
    }
    out
}

/// Show version and environment status
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let api_key_env = AppConfig::load(config_file.as_deref().map(Path::new))
        .remote_polish
        .api_key_env;

    println!("Photo Polish v{VERSION}");
    println!("Level-driven photo enhancement\n");

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
        "  {api_key_env} = {}",
        if std::env::var(&api_key_env).is_ok() {
            "(set)"
        } else {
            "(not set)"
        }
    );

    println!("\nCommands:");
    println!("  photo-polish serve                         Start the HTTP server");
    println!("  photo-polish enhance -i IN -o OUT -l N     Enhance a PNG file");
    println!("  photo-polish plan -l N                     Show the stage plan for a level");
}

/// Run the HTTP server
async fn run_server(config: Option<PathBuf>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_polish=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::load(config_path(config).as_deref());

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Photo Polish server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
