//! Print the OpenAPI document as JSON.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use pet_clinic::doc::ApiDoc;
use utoipa::OpenApi;

/// Dump the pet clinic OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version)]
struct Args {
    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()
    } else {
        doc.to_pretty_json()
    }
    .wrap_err("serialising the OpenAPI document")?;
    println!("{json}");
    Ok(())
}
