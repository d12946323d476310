use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use catalog::Catalog;
use clap::Parser;
use tracing::info;

mod http;
mod menu;

/// Browse a discography file over HTTP or from an interactive menu.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Args {
    /// Run the interactive menu instead of the HTTP server
    #[arg(long)]
    cli: bool,
    /// Discography text file to load at startup
    #[arg(long, env = "CATALOG_DB", default_value = "Pink_Floyd_DB.TXT")]
    db: PathBuf,
    #[arg(long, env = "CATALOG_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "CATALOG_PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    {
        use tracing_subscriber::prelude::*;

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init()
    }

    let args = Args::parse();

    let catalog = Catalog::load(&args.db)
        .with_context(|| format!("cannot start without {}", args.db.display()))?;
    info!(
        albums = catalog.albums().len(),
        songs = catalog.len(),
        skipped = catalog.malformed().len(),
        "catalog ready"
    );
    let catalog = Arc::new(catalog);

    if args.cli {
        tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            menu::run(&catalog, stdin.lock(), std::io::stdout())
        })
        .await
        .context("menu task failed")?
        .context("console i/o failed")?;
    } else {
        http::serve(catalog, &args.host, args.port)
            .await
            .with_context(|| format!("server on {}:{} failed", args.host, args.port))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serve_on_all_interfaces() {
        let args = Args::try_parse_from(["catalog_cli"]).unwrap();

        assert!(!args.cli);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8000);
    }

    #[test]
    fn cli_flag_selects_menu() {
        let args = Args::try_parse_from(["catalog_cli", "--cli", "--db", "floyd.txt"]).unwrap();

        assert!(args.cli);
        assert_eq!(args.db, PathBuf::from("floyd.txt"));
    }

    #[test]
    fn port_must_be_numeric() {
        assert!(Args::try_parse_from(["catalog_cli", "--port", "eighty"]).is_err());
    }
}
