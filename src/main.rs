//! StudyHub CLI
//!
//! Native front end for StudyHub. Each command runs one UI action against the
//! API, then prints the active view, its panel and any alert.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studyhub::config::generate_default_config;
use studyhub::panels::groups::{DETAIL_PLACEHOLDER, NO_MEMBERS, NO_RESOURCES, NO_SUBJECTS};
use studyhub::{
    AlertKind, ApiClient, App, Config, FileStore, GroupForm, HttpTransport, KeyValueStore,
    LoggingConfig, LoginForm, MatchesState, RegisterForm, Transport, View,
};

#[derive(Parser)]
#[command(name = "studyhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find study groups, share resources and meet study partners")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL, including the /api prefix
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: <config dir>/studyhub/config.toml or ./studyhub.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Password confirmation (default: same as --password)
        #[arg(long)]
        password2: Option<String>,
    },

    /// Forget the session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List subjects
    Subjects,

    /// List study groups
    Groups {
        /// Only groups covering this subject id
        #[arg(short, long)]
        subject: Option<u64>,
    },

    /// Show one group
    Group { id: u64 },

    /// Join a group
    Join { id: u64 },

    /// Leave a group
    Leave { id: u64 },

    /// Create a group
    CreateGroup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List shared resources
    Resources {
        /// Only resources of this group id
        #[arg(short, long)]
        group: Option<u64>,
    },

    /// Share a link with a group
    Share {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        link: String,
        /// Group id (default: first group listed)
        #[arg(short, long)]
        group: Option<u64>,
    },

    /// List users who share your subjects
    Matches,

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    if let Commands::InitConfig { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let store = FileStore::open(&config.session.file)
        .with_context(|| format!("Failed to open session file {}", config.session.file))?;
    let client = ApiClient::new(config.api.base_url.clone(), HttpTransport::new());
    let mut app = App::new(
        client,
        store,
        Duration::from_millis(config.ui.alert_timeout_ms),
    );

    tracing::debug!(api = %config.api.base_url, "StudyHub CLI v{}", env!("CARGO_PKG_VERSION"));

    run(&mut app, cli.command).await;
    render(&app);

    if matches!(app.alert(), Some(alert) if alert.kind == AlertKind::Error) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("studyhub={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

/// Failures are reported through the alert slot
async fn run<T: Transport, S: KeyValueStore>(app: &mut App<T, S>, command: Commands) {
    match command {
        Commands::Login { username, password } => {
            let _ = app.login(&LoginForm::new(username, password)).await;
        }

        Commands::Register {
            username,
            email,
            password,
            password2,
        } => {
            let form = RegisterForm {
                password2: password2.unwrap_or_else(|| password.clone()),
                username,
                email,
                password,
            };
            let _ = app.register(&form).await;
        }

        Commands::Logout => app.logout().await,

        Commands::Whoami => app.navigate(View::Auth).await,

        Commands::Subjects => app.navigate(View::Dashboard).await,

        Commands::Groups { subject } => {
            app.set_subject_filter(subject);
            app.navigate(View::Groups).await;
        }

        Commands::Group { id } => {
            app.navigate(View::Groups).await;
            let _ = app.load_group_detail(id).await;
        }

        Commands::Join { id } => {
            app.navigate(View::Groups).await;
            let _ = app.join_group(id).await;
        }

        Commands::Leave { id } => {
            app.navigate(View::Groups).await;
            let _ = app.leave_group(id).await;
        }

        Commands::CreateGroup { name, description } => {
            app.navigate(View::Groups).await;
            app.groups.open_form();
            app.groups.form = GroupForm::new(name, description.unwrap_or_default());
            let _ = app.submit_group_form().await;
        }

        Commands::Resources { group } => {
            app.set_group_filter(group);
            app.navigate(View::Resources).await;
        }

        Commands::Share { title, link, group } => {
            // Populates the group select
            let _ = app.load_groups().await;
            app.navigate(View::Resources).await;
            app.resources.open_form();
            app.resources.form.title = title;
            app.resources.form.link = link;
            if group.is_some() {
                app.resources.form.group = group;
            }
            let _ = app.submit_resource_form().await;
        }

        Commands::Matches => app.navigate(View::Matches).await,

        Commands::InitConfig { .. } => {}
    }
}

fn render<T: Transport, S: KeyValueStore>(app: &App<T, S>) {
    let view = app.active_view();
    let auth = app.auth_view();
    let signed_in = auth.can_create();

    println!("{}", view.title());
    println!("{}", view.subtitle());
    println!();

    match view {
        View::Dashboard => {
            if let Some(message) = app.subjects.empty_message() {
                println!("{}", message);
            }
            for subject in app.subjects.subjects() {
                println!("  {:<6} {}", subject.id, subject.name);
            }
        }

        View::Groups => {
            if let Some(message) = app.groups.empty_message() {
                println!("{}", message);
            } else {
                println!("{:<6} {:<30} {:<15} {}", "ID", "Name", "Owner", "Description");
                println!("{}", "-".repeat(72));
            }
            for card in app.groups.cards(signed_in) {
                println!(
                    "{:<6} {:<30} {:<15} {}",
                    card.id, card.name, card.owner, card.description
                );
            }

            println!();
            match app.groups.detail(signed_in) {
                Some(detail) => {
                    println!("{} (#{})", detail.name, detail.id);
                    println!("  {}", detail.description);
                    println!("  Subjects: {}", join_or(&detail.subjects, NO_SUBJECTS));
                    println!("  Members: {}", join_or(&detail.members, NO_MEMBERS));
                    if detail.resources.is_empty() {
                        println!("  Resources: {}", NO_RESOURCES);
                    } else {
                        println!("  Resources:");
                        for line in &detail.resources {
                            println!(
                                "    {} <{}> by {}",
                                line.title,
                                line.link.as_deref().unwrap_or("-"),
                                line.uploader
                            );
                        }
                    }
                }
                None => println!("{}", DETAIL_PLACEHOLDER),
            }
        }

        View::Resources => {
            if let Some(message) = app.resources.empty_message() {
                println!("{}", message);
            }
            for card in app.resources.cards() {
                println!("{}", card.title);
                if let Some(link) = &card.link {
                    println!("  {}", link);
                }
                println!("  {}", card.meta);
            }
        }

        View::Matches => {
            if let Some(message) = app.matches.message() {
                println!("{}", message);
            }
            if let MatchesState::Loaded(_) = app.matches.state() {
                for card in app.matches.cards() {
                    println!("{:<20} {}", card.username, card.subjects.join(", "));
                }
            }
        }

        View::Auth => {
            println!("{}", auth.status_line());
            let pill = auth.user_pill();
            if !pill.is_empty() {
                println!("{}", pill);
            }
        }
    }

    if let Some(alert) = app.alert() {
        match alert.kind {
            AlertKind::Success => println!("\n{}", alert.message),
            AlertKind::Error => eprintln!("\nError: {}", alert.message),
        }
    }
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
