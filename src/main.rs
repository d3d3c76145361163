use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use media_theme::cli::Args;
use media_theme::config::Config;
use media_theme::pipeline::extract_theme_color_with_config;
use media_theme::preview;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let theme = extract_theme_color_with_config(&args.reference, args.kind, config).await;

    let backend = args.format.backend();
    match &args.output {
        Some(path) => {
            backend.write_to(&theme, path)?;
            eprintln!("Wrote {} theme to {}", backend.name(), path.display());
        }
        None => print!("{}", backend.serialize(&theme)?),
    }

    if args.preview {
        eprint!("{}", preview::render(&theme));
    }

    Ok(())
}
