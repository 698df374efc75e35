use clap::Parser;
use recipe_browser::{
    api::RecipeClient,
    browser::{DisplayStatus, RecipeBrowser},
    cli::{commands, shell, Cli, Commands},
    config::Settings,
    Result,
};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("\x1b[31m\u{2717}\x1b[0m {}", e.log_safe());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so rendered output and --json stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,recipe_browser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(api_url) = cli.api_url {
        settings.api.base_url = api_url;
    }
    if let Some(limit) = cli.limit {
        settings.browse.default_limit = limit;
    }
    settings.validate()?;

    debug!("Using recipe API at {}", settings.api.base_url);

    let client = RecipeClient::new(&settings.api)?;
    let mut browser = RecipeBrowser::new(
        client,
        settings.browse.default_limit,
        settings.browse.selection_policy,
    );

    let status = match cli.command {
        Commands::List { page } => commands::list(&mut browser, page, cli.json).await?,
        Commands::Search {
            title,
            cuisine,
            rating,
            total_time,
            calories,
        } => {
            let args = commands::SearchArgs {
                title,
                cuisine,
                rating,
                total_time,
                calories,
            };
            commands::search(&mut browser, args, cli.json).await?
        }
        Commands::Show { id, page, expand } => {
            commands::show(&mut browser, id, page, expand, cli.json).await?
        }
        Commands::Browse => {
            shell::run(&mut browser, cli.json).await?;
            return Ok(());
        }
    };

    // The view already explains the failure; only the exit code is left to set
    if status == DisplayStatus::Error {
        std::process::exit(1);
    }

    Ok(())
}
