use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "colconv-cmd")]
#[command(about = "Command-line utility for decoding converted-type column values")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode raw column values and print them as JSON
    Decode {
        /// Physical type of the column (e.g. INT32, BYTE_ARRAY)
        #[arg(long)]
        physical: String,

        /// Converted type of the column (e.g. DECIMAL, DATE); omit for pass-through
        #[arg(long)]
        converted: Option<String>,

        /// DECIMAL scale
        #[arg(long)]
        scale: Option<i32>,

        /// DECIMAL precision
        #[arg(long)]
        precision: Option<i32>,

        /// Value length of a FIXED_LEN_BYTE_ARRAY column
        #[arg(long)]
        type_length: Option<i32>,

        /// Use the legacy DECIMAL and DATE interpretation
        #[arg(long)]
        legacy: bool,

        /// JSON file with conversion options
        #[arg(long)]
        options: Option<String>,

        /// Convert on the rayon pool
        #[arg(long)]
        parallel: bool,

        /// Column values: integers for INT32/INT64, hex strings for byte arrays
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// List the supported converted/physical type pairs
    Types {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            physical,
            converted,
            scale,
            precision,
            type_length,
            legacy,
            options,
            parallel,
            values,
        } => commands::decode::run(commands::decode::DecodeArgs {
            physical,
            converted,
            scale,
            precision,
            type_length,
            legacy,
            options,
            parallel,
            values,
        }),
        Commands::Types { json } => commands::types::run(json),
    }
}
