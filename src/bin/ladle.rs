use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ladle::api::RecipeApi;
use ladle::config::AppConfig;
use ladle::controller::App;
use ladle::model::Model;
use ladle::store::BookmarkStore;

#[derive(Parser, Debug)]
#[command(name = "ladle", about = "Search, bookmark and upload recipes from the terminal")]
struct Args {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "ladle.toml")]
    config: String,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so the drawn screen on stdout stays clean.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

const HELP: &str = "\
Commands:
  search <query>        run a search
  page <n>              jump to a results page
  open <id>             open a recipe by its id
  servings <n>          rescale the open recipe
  bookmark              toggle the bookmark on the open recipe
  delete                delete the open recipe (own recipes only)
  add                   open the upload form
  set <field> <value>   fill an upload form field
  +ing / -ing           add or remove an ingredient row
  submit                submit the upload form
  cancel                close the upload form
  help                  this text
  quit                  exit";

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Could not load configuration");
            std::process::exit(1);
        }
    };

    let api = match RecipeApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "Could not build the API client");
            std::process::exit(1);
        }
    };
    let store = BookmarkStore::new(&config.bookmarks_path);
    let model = match Model::new(Box::new(api), store, config.page_size) {
        Ok(model) => model,
        Err(e) => {
            error!(error = %e, "Could not load bookmarks");
            std::process::exit(1);
        }
    };

    let modal_close = Duration::from_secs_f64(config.modal_close_secs);
    let mut app = App::new(model, modal_close);

    info!("Ready. Type 'help' for commands.");
    print!("{}", app.draw());

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        }
        if !dispatch(&mut app, line.trim()).await {
            break;
        }
        print!("{}", app.draw());
    }
}

/// Runs one command; returns false when the user quits. Commands run
/// sequentially: each one finishes (including its network call) before
/// the next line is read.
async fn dispatch(app: &mut App, line: &str) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "search" => app.control_search(rest).await,
        "page" => match rest.parse::<usize>() {
            Ok(page) if page >= 1 => app.control_pagination(page),
            _ => println!("usage: page <n>"),
        },
        "open" => {
            if rest.is_empty() {
                println!("usage: open <id>");
            } else {
                app.control_recipe(rest).await;
            }
        }
        "servings" => match rest.parse::<u32>() {
            Ok(n) => app.control_servings(n),
            Err(_) => println!("usage: servings <n>"),
        },
        "bookmark" => app.control_bookmark(),
        "delete" => app.control_delete().await,
        "add" => app.control_open_form(),
        "set" => match rest.split_once(char::is_whitespace) {
            Some((name, value)) => app.control_set_field(name, value.trim()),
            None => println!("usage: set <field> <value>"),
        },
        "+ing" => app.control_add_ingredient(),
        "-ing" => app.control_remove_ingredient(),
        "submit" => {
            app.control_upload().await;
            print!("{}", app.draw());
            app.auto_close_form().await;
        }
        "cancel" => app.control_close_form(),
        "help" => println!("{HELP}"),
        "quit" | "exit" => return false,
        other => println!("Unknown command '{other}'. Type 'help'."),
    }
    true
}
