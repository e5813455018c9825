use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launch_cost::api::{self, AppState};
use launch_cost::config::{self, AppConfig};
use launch_cost::estimator::CostEstimator;
use launch_cost::models::{
    CurrencyConversion, PredictionInput, DEFAULT_MISSION_YEARS, DEFAULT_PAYLOAD_WEIGHT,
};
use launch_cost::render::{self, DisplayCurrency};
use launch_cost::store::ModelStore;

#[derive(Parser)]
#[command(name = "launch-cost")]
#[command(about = "Estimate satellite launch cost from a pre-trained linear model")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the prediction form and JSON API
    Serve {
        /// Port for HTTP
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Run a single prediction and print the result
    Predict {
        /// Payload weight in kilograms
        #[arg(long, default_value_t = DEFAULT_PAYLOAD_WEIGHT,
              value_parser = clap::value_parser!(u32).range(100..=10_000))]
        payload_weight: u32,

        /// Mission duration in years
        #[arg(long, default_value_t = DEFAULT_MISSION_YEARS,
              value_parser = clap::value_parser!(u32).range(1..=30))]
        mission_years: u32,

        /// Orbit type: LEO, MEO or GEO
        #[arg(long, default_value = "LEO")]
        orbit: String,

        /// Rocket class: Light, Medium or Heavy
        #[arg(long, default_value = "Light")]
        rocket: String,

        /// Fuel type: Solid, Liquid or Cryogenic
        #[arg(long, default_value = "Solid")]
        fuel: String,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Print the loaded model's coefficients and intercept
    Model {
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Path to the model artifact (JSON)
    #[arg(short = 'm', long = "model")]
    path: Option<PathBuf>,

    /// Report negative predictions as-is instead of flooring them at zero
    #[arg(long)]
    no_clamp: bool,
}

#[derive(Args)]
struct DisplayArgs {
    /// Display results in crores
    #[arg(long)]
    crores: bool,

    /// Local currency units per USD for the crores display
    #[arg(long, value_parser = parse_fx_rate)]
    fx_rate: Option<CurrencyConversion>,
}

fn parse_fx_rate(raw: &str) -> Result<CurrencyConversion, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    CurrencyConversion::try_new(rate)
}

impl ModelArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.path {
            config.model_path = Some(path.clone());
        }
        if self.no_clamp {
            config.clamp_negative = false;
        }
    }
}

impl DisplayArgs {
    fn apply(&self, config: &mut AppConfig) {
        if self.crores {
            config.show_crores = true;
        }
        if let Some(conversion) = self.fx_rate {
            config.fx_rate = conversion.fx_rate();
        }
    }
}

/// Initialize tracing with output to stderr (for one-shot commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "launch_cost=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // One-shot commands print their result on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Load the model artifact. A failure here is fatal: nothing can be
/// predicted without it.
fn open_store(config: &AppConfig) -> anyhow::Result<ModelStore> {
    let store = match &config.model_path {
        Some(path) => ModelStore::open(path),
        None => ModelStore::open_default(),
    };
    store.context("Cannot start without a model artifact")
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let state = AppState::new(&store, config.clamp_policy(), config.display_currency())
        .with_currency(config.currency());
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!(
        "Launch cost estimator listening on http://127.0.0.1:{}",
        config.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let mut config = AppConfig::load();

    match cli.command {
        Some(Commands::Serve {
            port,
            model,
            display,
        }) => {
            if let Some(port) = port {
                config.port = port;
            }
            model.apply(&mut config);
            display.apply(&mut config);
            serve(config).await?;
        }
        Some(Commands::Predict {
            payload_weight,
            mission_years,
            orbit,
            rocket,
            fuel,
            model,
            display,
        }) => {
            model.apply(&mut config);
            display.apply(&mut config);

            let store = open_store(&config)?;
            let estimator = CostEstimator::from_store(&store, config.clamp_policy());
            let input = PredictionInput {
                payload_weight_kg: payload_weight,
                mission_years,
                orbit,
                rocket,
                fuel,
            };
            let mut estimate = estimator.estimate(&input)?;
            let currency = config.display_currency();
            if let DisplayCurrency::Crores(conversion) = currency {
                estimate = estimate.with_crores(conversion);
            }
            println!("{}", render::render_estimate(&estimate, currency));
        }
        Some(Commands::Model { model }) => {
            model.apply(&mut config);
            let store = open_store(&config)?;
            println!("{}", serde_json::to_string_pretty(&store.summary())?);
        }
        Some(Commands::Config { init }) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if init {
                config.save()?;
                eprintln!("Wrote {}", config::get_config_path()?.display());
            }
        }
        None => {
            serve(config).await?;
        }
    }

    Ok(())
}
