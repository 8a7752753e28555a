use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use rusty_etl::config::EtlArgs;
use rusty_etl::logging::init_logging;
use rusty_etl::pipeline;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = EtlArgs::parse()
        .into_config()
        .context("invalid reading options")?;
    let report = pipeline::run(&config)
        .with_context(|| format!("sales ETL into {} failed", config.store.path.display()))?;
    println!("{report}");
    Ok(())
}
