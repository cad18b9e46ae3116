use clap::{Parser, Subcommand};
use pixeldocs::{cards, config, output, sidebar, social, versions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixeldocs")]
#[command(about = "Sidebar composer and banner card generator for documentation sites")]
#[command(long_about = "\
Sidebar composer and banner card generator for documentation sites

The site root holds one directory per project. Each project describes its
own navigation and pages; pixeldocs stitches them together.

Site structure:

  site/
  ├── config.toml                  # Tool config (optional)
  ├── index.md                     # Landing page → index.png
  ├── flash/
  │   ├── config/sidebar.json      # {\"/flash/\": [ ...sections ]}
  │   ├── installation.md          # → flash-installation.png
  │   └── usage.md                 # → flash-usage.png
  └── mobot/
      ├── config/sidebar.json
      └── commands.md              # → mobot-commands.png

Card text resolution (first available wins):
  Title:       banner_title → title → file name
  Description: banner_description → empty

Run 'pixeldocs gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose the merged sidebar and print it as JSON
    Sidebar {
        /// Write JSON to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the theme configuration (title, logo, sidebar) as JSON
    Theme {
        /// Write JSON to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate banner cards for the index and every project page
    Banners,
    /// Print the social head tags for one document
    Head {
        /// Markdown document inside the site root
        document: PathBuf,
    },
    /// Print the latest published version of an artifact
    LatestVersion {
        /// Artifact path in the repository, e.g. com/pixelservices/flash
        artifact: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Sidebar { out } => {
            let config = config::load_config(&cli.root)?;
            let map = compose_sidebar(&config, &cli.root)?;
            write_json(&map, out.as_deref())?;
        }
        Command::Theme { out } => {
            let config = config::load_config(&cli.root)?;
            let map = compose_sidebar(&config, &cli.root)?;
            let theme = sidebar::ThemeConfig::from_config(&config, map);
            write_json(&theme, out.as_deref())?;
        }
        Command::Banners => {
            let config = config::load_config(&cli.root)?;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_card_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = cards::generate_all(&config, &cli.root, Some(tx));
            printer.join().map_err(|_| "output thread panicked")?;
            let summary = result?;
            output::print_generate_summary(&summary);
        }
        Command::Head { document } => {
            let config = config::load_config(&cli.root)?;
            let document = if document.is_absolute() {
                document
            } else {
                cli.root.join(document)
            };
            match social::page_head_tags(&cli.root, &document, &config)? {
                Some(tags) => write_json(&tags, None)?,
                None => eprintln!("No banner card for {}", document.display()),
            }
        }
        Command::LatestVersion { artifact } => {
            let config = config::load_config(&cli.root)?;
            let client = versions::VersionClient::new(&config.versions);
            println!("{}", client.display_version(&artifact));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Compose the sidebar, reporting progress on stderr so stdout stays JSON.
fn compose_sidebar(
    config: &config::DocsConfig,
    root: &Path,
) -> Result<pixeldocs::types::SidebarMap, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_sidebar_event(&event) {
                eprintln!("{}", line);
            }
        }
    });
    let result = sidebar::compose_from_config(config, root, Some(tx));
    printer.join().map_err(|_| "output thread panicked")?;
    Ok(result?)
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json + "\n")?;
        }
        None => println!("{}", json),
    }
    Ok(())
}
