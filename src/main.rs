//! Command-line access to a single DynamoDB table through the
//! `simple_dynamo` client: fetch, query and write items as JSON.
use std::sync::Arc;

use color_eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use simple_dynamo::{SimpleClient, aws};

mod subcommands;

#[derive(clap::Parser)]
#[command(
    name = "simple-dynamo",
    version,
    about = "Read and write DynamoDB items as JSON",
    long_about = None
)]
struct Cli {
    /// Increase output verbosity (-v, -vv, etc.)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Endpoint URL for the DynamoDB service
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Table every command operates on
    #[arg(long, global = true, env = "SIMPLE_DYNAMO_TABLE")]
    table: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch one item by partition and sort key
    Get(subcommands::get::Options),
    /// Query a partition, newest first
    Query(subcommands::query::Options),
    /// Write one item given as a JSON object
    Put(subcommands::put::Options),
    /// Check that the endpoint answers
    Ping,
    /// Print the current local timestamp used in sort keys
    Timestamp,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("install aws-lc-rs provider");

    color_eyre::install()?;
    let cli = <Cli as clap::Parser>::parse();
    init_tracing(cli.verbose);

    if let Commands::Timestamp = cli.command {
        println!("{}", simple_dynamo::util::current_timestamp());
        return Ok(());
    }

    let client = Arc::new(aws::new_client(cli.endpoint_url.as_deref()).await);
    if let Commands::Ping = cli.command {
        aws::validate_connection(&client).await?;
        println!("ok");
        return Ok(());
    }

    let table = cli
        .table
        .ok_or_else(|| color_eyre::eyre::eyre!("--table (or SIMPLE_DYNAMO_TABLE) is required"))?;
    let client = SimpleClient::new(client, table);
    match cli.command {
        Commands::Get(options) => subcommands::get::command(&client, options).await,
        Commands::Query(options) => subcommands::query::command(&client, options).await,
        Commands::Put(options) => subcommands::put::command(&client, options).await,
        Commands::Ping | Commands::Timestamp => Ok(()),
    }
}
