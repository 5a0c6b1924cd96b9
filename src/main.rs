use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use yatube::{
    data_formats::{FormValidate, GroupRequest},
    db_helpers::create_group_in_db,
    init_db, run_app, Config,
};

#[derive(Parser)]
#[command(name = "yatube", about = "A social blogging server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve,
    /// Create a group posts can be filed under.
    CreateGroup {
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        description: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_app(config).await,
        Command::CreateGroup {
            title,
            slug,
            description,
        } => {
            let request = GroupRequest::new(&title, &slug, &description);
            let errors = request.form_errors();
            if !errors.is_empty() {
                anyhow::bail!("Invalid group: {errors}");
            }
            let pool = init_db(&config.database_url).await?;
            let group = create_group_in_db(&pool, request).await?;
            info!("Created group {} ({})", group, group.slug);
            Ok(())
        }
    }
}
