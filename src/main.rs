use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flashdeck::cli::{self, Cli};
use flashdeck::config::Config;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let config = Config::load();

  // stderr keeps log lines out of the study prompt
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_filter.as_str().into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  cli::run(cli, &config)
}
