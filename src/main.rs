//! product-search: interactive autocomplete driver
//!
//! Reads commands from stdin, feeds them to the autocomplete controller and
//! prints the dropdown after every change.

use anyhow::Result;
use product_search::{
    autocomplete::{AutocompleteController, Dropdown, Key},
    cache::ResultCache,
    catalog::{filter_products, CatalogClient, Product},
    config,
    network::HttpClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("product-search {}", product_search::VERSION);
                return Ok(());
            }
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a file path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    info!("Starting product-search v{}", product_search::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;

    // Initialize HTTP client
    let http = HttpClient::with_settings(&settings.outgoing)?;
    let catalog = Arc::new(CatalogClient::new(http, &settings.catalog));
    info!("Searching {}", settings.catalog.search_url);

    let cache = Arc::new(ResultCache::new());
    let mut controller = AutocompleteController::new(
        settings.autocomplete.to_config(),
        catalog.clone(),
        cache,
    );
    let mut listing: Option<Vec<Product>> = None;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Help => print_commands(),
                    Command::Key(key) => {
                        let _ = controller.handle_key_down(&key);
                    }
                    Command::Focus => controller.handle_focus(),
                    Command::Close => controller.close_dropdown(),
                    Command::Pick(n) => {
                        let picked = n
                            .checked_sub(1)
                            .and_then(|i| controller.state().suggestions.get(i))
                            .cloned();
                        match picked {
                            Some(suggestion) => controller.select_suggestion(&suggestion),
                            None => println!("no suggestion #{}", n),
                        }
                    }
                    Command::List => {
                        if listing.is_none() {
                            match catalog.list_products().await {
                                Ok(products) => listing = Some(products),
                                Err(e) => warn!("{}", e),
                            }
                        }
                        if let Some(ref products) = listing {
                            print_listing(products, &controller.state().query);
                        }
                        continue;
                    }
                    Command::Query(query) => controller.set_query(query),
                }
                render(&controller);
            }
            Some(_) = controller.next_transition() => render(&controller),
        }
    }

    controller.shutdown();
    Ok(())
}

/// One line of REPL input
#[derive(Debug, PartialEq)]
enum Command {
    Query(String),
    Key(Key),
    Focus,
    Close,
    Pick(usize),
    List,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match parts.next().unwrap_or_default() {
            "down" => Command::Key(Key::ArrowDown),
            "up" => Command::Key(Key::ArrowUp),
            "enter" => Command::Key(Key::Enter),
            "esc" => Command::Key(Key::Escape),
            "tab" => Command::Key(Key::Tab),
            "focus" => Command::Focus,
            "close" => Command::Close,
            "list" => Command::List,
            "pick" => match parts.next().and_then(|n| n.parse().ok()) {
                Some(n) => Command::Pick(n),
                None => Command::Help,
            },
            "q" | "quit" => Command::Quit,
            _ => Command::Help,
        }
    }
}

fn render(controller: &AutocompleteController) {
    let query = &controller.state().query;
    match controller.dropdown() {
        Dropdown::Hidden => println!("[{}]", query),
        Dropdown::Loading => println!("[{}] loading...", query),
        Dropdown::Error(err) => println!("[{}] {}", query, err),
        Dropdown::Empty => println!("[{}] No suggestions found", query),
        Dropdown::Suggestions { items, active } => {
            println!("[{}]", query);
            for (i, item) in items.iter().enumerate() {
                let marker = if active == Some(i) { '>' } else { ' ' };
                println!(" {} {:>2}. {}  ${:.2}", marker, i + 1, item.title, item.price);
            }
        }
    }
}

fn print_listing(products: &[Product], query: &str) {
    let matches = filter_products(products, query);
    println!("{} of {} products match '{}'", matches.len(), products.len(), query.trim());
    for product in matches {
        println!("  #{:<4} {}  ${:.2}  [{}]", product.id, product.title, product.price, product.category);
    }
}

fn print_commands() {
    println!(
        r#"Any line without a leading ':' replaces the query.
  :down :up :enter :esc :tab   keyboard navigation
  :focus                       re-check suggestions for the current query
  :close                       close the dropdown
  :pick N                      select suggestion N
  :list                        show the product listing filtered by the query
  :quit                        exit"#
    );
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
product-search v{}
Interactive product autocomplete

USAGE:
    product-search [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    PRODUCT_SEARCH_SETTINGS_PATH     Path to settings.yml
    PRODUCT_SEARCH_PRODUCTS_URL      Product listing endpoint
    PRODUCT_SEARCH_SEARCH_URL        Product search endpoint
    PRODUCT_SEARCH_MIN_QUERY_LENGTH  Minimum query length
    PRODUCT_SEARCH_DEBOUNCE_MS       Debounce delay in milliseconds
    RUST_LOG                         Log filter (default: info)
"#,
        product_search::VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("red shoes"), Command::Query("red shoes".to_string()));
        assert_eq!(Command::parse(":down"), Command::Key(Key::ArrowDown));
        assert_eq!(Command::parse(":pick 3"), Command::Pick(3));
        assert_eq!(Command::parse(":pick x"), Command::Help);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Query(String::new()));
    }
}
