//! Command-line entry point: thin wrappers over the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use blog_saver::{
    ArticleApiClient, Config, ContentStore, Pipeline, RepoStatus, fetch_all_articles,
    fetch_and_save_article, init_repo, repo_status,
};

#[derive(Parser)]
#[command(
    name = "blog-saver",
    version,
    about = "Extract blog content and save it to a Git repository"
)]
struct Cli {
    /// Repository root to operate on.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Initialize a new Git repository for blog posts.
    Init,
    /// Extract a blog post from a URL and save it.
    Add { url: String },
    /// Show the repository status.
    Status,
    /// Store the article generator API key.
    SetApiKey { key: String },
    /// Print the configured API key.
    GetApiKey,
    /// List articles available from the article generator.
    ListArticles,
    /// Fetch one article by id and save it.
    FetchArticle { id: String },
    /// Fetch every listed article, continuing past failures.
    FetchAll,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> blog_saver::Result<()> {
    let root = cli.root;

    match cli.command {
        CliCommand::Init => {
            init_repo(&root).await?;
            println!("Repository initialized successfully!");
        }
        CliCommand::Add { url } => {
            let pipeline = Pipeline::new(&root);
            let filename = pipeline.add_blog_post(&url).await?;
            println!("Blog post saved as {filename}");
        }
        CliCommand::Status => match repo_status(&root).await {
            Ok(status) => print_status(&status),
            Err(e) => {
                eprintln!("Error getting repository status: {e}");
                print_status(&RepoStatus::unknown());
            }
        },
        CliCommand::SetApiKey { key } => {
            let mut config = Config::load(&root).await?;
            config.api_key = Some(key);
            config.save(&root).await?;
            println!("API key saved.");
        }
        CliCommand::GetApiKey => {
            let config = Config::load(&root).await?;
            match config.api_key {
                Some(key) if !key.is_empty() => println!("{key}"),
                _ => println!("No API key set."),
            }
        }
        CliCommand::ListArticles => {
            let config = Config::load(&root).await?;
            let client = ArticleApiClient::from_config(&config)?;
            for article in client.list_articles().await? {
                println!(
                    "{}: {}",
                    article.id,
                    article.title.as_deref().unwrap_or("Untitled Article")
                );
            }
        }
        CliCommand::FetchArticle { id } => {
            let config = Config::load(&root).await?;
            let client = ArticleApiClient::from_config(&config)?;
            let store = ContentStore::new(&root);
            let filename = fetch_and_save_article(&client, &store, &id).await?;
            println!("Article saved as {filename}");
        }
        CliCommand::FetchAll => {
            let config = Config::load(&root).await?;
            let client = ArticleApiClient::from_config(&config)?;
            let store = ContentStore::new(&root);
            let count = fetch_all_articles(&client, &store).await?;
            println!("Saved {count} articles.");
        }
    }

    Ok(())
}

fn print_status(status: &RepoStatus) {
    println!("On branch {}", status.branch);
    print_files("Staged", &status.staged);
    print_files("Modified", &status.modified);
    print_files("Untracked", &status.untracked);
}

fn print_files(label: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("{label}:");
    for file in files {
        println!("  {file}");
    }
}
