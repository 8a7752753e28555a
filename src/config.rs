//! Command line and environment configuration of both binaries.
//!
//! Every option falls back to an environment variable; binaries load a `.env`
//! file first, so either source works.
use crate::database::StoreConfig;
use crate::error::RustyEtlError;
use crate::pipeline::EtlConfig;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::range::Range;
use clap::Parser;
use glob::Pattern;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_SALES_DATABASE: &str = "sales_data.db";
pub const DEFAULT_JOKES_DATABASE: &str = "jokes.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_JOKE_API_URL: &str = "https://v2.jokeapi.dev/joke/Any";
pub const DEFAULT_JOKE_AMOUNT: u32 = 100;
pub const DEFAULT_JOKE_TYPE: &str = "twopart";

#[derive(Parser, Debug, Clone)]
#[command(name = "sales-etl")]
#[command(about = "Load two regional order sheets into the sales_data table and validate it")]
#[command(version)]
pub struct EtlArgs {
    /// Order workbook of region A
    #[arg(long, env = "SALES_ETL_REGION_A")]
    pub region_a: PathBuf,

    /// Order workbook of region B
    #[arg(long, env = "SALES_ETL_REGION_B")]
    pub region_b: PathBuf,

    /// DuckDB database file
    #[arg(long, env = "SALES_ETL_DATABASE", default_value = DEFAULT_SALES_DATABASE)]
    pub database: PathBuf,

    /// Glob pattern of the sheet to read; the first sheet by default
    #[arg(long)]
    pub sheet: Option<String>,

    /// Cell range to read, e.g. A1:E500
    #[arg(long)]
    pub range: Option<String>,

    /// Cell text to read as empty, may be repeated
    #[arg(long = "null")]
    pub nulls: Vec<String>,

    /// Read error cells (#DIV/0!, #N/A, ...) as empty
    #[arg(long)]
    pub error_as_null: bool,

    /// Keep rows without any value
    #[arg(long)]
    pub keep_empty_rows: bool,
}

impl EtlArgs {
    pub fn into_config(self) -> Result<EtlConfig, RustyEtlError> {
        let mut criteria = Criteria {
            error_as_null: self.error_as_null,
            skip_empty_rows: !self.keep_empty_rows,
            ..Criteria::default()
        };
        if let Some(sheet) = &self.sheet {
            criteria.sheet_name_patterns = Some(vec![Pattern::new(sheet)?]);
        }
        if let Some(range) = &self.range {
            criteria.range = Some(Range::try_from(range.as_str())?);
        }
        criteria.nulls.extend(self.nulls);

        Ok(EtlConfig {
            region_a: self.region_a,
            region_b: self.region_b,
            store: StoreConfig::new(self.database),
            criteria,
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "joke-service")]
#[command(about = "Fetch jokes from JokeAPI and serve the stored ones over HTTP")]
#[command(version)]
pub struct ServiceArgs {
    /// Address to listen on
    #[arg(long, env = "JOKE_SERVICE_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// DuckDB database file
    #[arg(long, env = "JOKE_SERVICE_DATABASE", default_value = DEFAULT_JOKES_DATABASE)]
    pub database: PathBuf,

    /// Joke endpoint of the API
    #[arg(long, env = "JOKE_API_URL", default_value = DEFAULT_JOKE_API_URL)]
    pub api_url: String,

    /// Jokes requested per fetch
    #[arg(long, env = "JOKE_API_AMOUNT", default_value_t = DEFAULT_JOKE_AMOUNT)]
    pub amount: u32,

    /// Joke type requested per fetch (single, twopart)
    #[arg(long, env = "JOKE_API_TYPE", default_value = DEFAULT_JOKE_TYPE)]
    pub joke_type: String,
}

impl ServiceArgs {
    pub fn store(&self) -> StoreConfig {
        StoreConfig::new(&self.database)
    }
}
