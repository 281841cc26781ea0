//! Draftdesk - command-line shell for the AI blog draft assistant

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use draftdesk::{
    api::ApiClient,
    config::Config,
    models::{
        BlogPost, BlogPostUpdate, PostStatus, UserUpdate, WordPressSettings, POST_STATUSES,
        POST_TYPES,
    },
    pages::{
        self, dashboard, layout, preview::PreviewView, upload, Notice, Resolution, Route,
    },
    services::{Document, Services},
    session::create_token_store,
};

#[derive(Parser)]
#[command(name = "draftdesk")]
#[command(about = "Turn documents into blog drafts and publish them to WordPress")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with the account email and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short = 'n', long)]
        full_name: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current account
    Whoami,
    /// Update the current account
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Post statistics and recent posts
    Dashboard,
    /// List all posts, newest first
    List,
    /// Create a draft from a PDF or Word document (max 10MB by default)
    Upload {
        file: PathBuf,
        /// Extra instructions for the extraction, e.g. tone or format
        #[arg(short, long, default_value = "")]
        prompt: String,
    },
    /// Show a post
    Preview { id: Option<String> },
    /// Change fields of a post
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Comma separated
        #[arg(long, value_delimiter = ',')]
        keywords: Option<Vec<String>>,
        #[arg(long)]
        status: Option<PostStatus>,
    },
    /// Generate a cover image for a post
    GenerateImage { id: i64 },
    /// Publish a post to WordPress
    Publish { id: i64 },
    /// Delete a post
    Delete { id: i64 },
    /// WordPress connection settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the saved settings
    Show,
    /// Change and save settings
    Save(SettingsArgs),
    /// Test the connection, with optional overrides that are not saved
    Test(SettingsArgs),
}

#[derive(clap::Args)]
struct SettingsArgs {
    #[arg(long)]
    site_url: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    application_password: Option<String>,
    /// post, page or custom
    #[arg(long)]
    post_type: Option<String>,
    /// draft, publish or private
    #[arg(long)]
    post_status: Option<String>,
}

impl SettingsArgs {
    fn apply(self, settings: &mut WordPressSettings) -> Result<()> {
        if let Some(post_type) = self.post_type.as_deref() {
            if !POST_TYPES.contains(&post_type) {
                bail!("post type must be one of {}", POST_TYPES.join(", "));
            }
        }
        if let Some(post_status) = self.post_status.as_deref() {
            if !POST_STATUSES.contains(&post_status) {
                bail!("post status must be one of {}", POST_STATUSES.join(", "));
            }
        }
        let fields = [
            ("siteUrl", self.site_url),
            ("username", self.username),
            ("applicationPassword", self.application_password),
            ("postType", self.post_type),
            ("postStatus", self.post_status),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                settings.set_field(name, value).map_err(anyhow::Error::msg)?;
            }
        }
        Ok(())
    }
}

impl Command {
    /// Page the command acts on, for the session guard
    fn route(&self) -> Route {
        match self {
            Command::Login { .. } => Route::Login,
            Command::Register { .. } => Route::Register,
            Command::Logout | Command::Whoami | Command::Profile { .. } => Route::Dashboard,
            Command::Dashboard | Command::List => Route::Dashboard,
            Command::Upload { .. } => Route::Upload,
            Command::Preview { id } => Route::Preview(id.clone()),
            Command::Edit { id, .. }
            | Command::GenerateImage { id }
            | Command::Publish { id }
            | Command::Delete { id } => Route::preview(*id),
            Command::Settings { .. } => Route::Settings,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_env(&cli.config)?;
    tracing::debug!("Using backend {}", config.api.base_url);

    let tokens = create_token_store(&config.session);
    let client = ApiClient::from_config(&config.api, tokens)?;
    let services = Services::new(client);

    // Logout always works, even without a session
    if !matches!(cli.command, Command::Logout) {
        match layout::guard(&services.auth, cli.command.route()) {
            Resolution::Render(_) => {}
            Resolution::Redirect(_) => bail!("Not logged in. Run `draftdesk login` first."),
            Resolution::Unknown(path) => bail!("Unknown page {}", path),
        }
    }

    run(cli.command, &services, &config).await
}

async fn run(command: Command, services: &Services, config: &Config) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let route = pages::auth::login(&services.auth, &username, &password)
                .await
                .map_err(notice_error)?;
            println!("Logged in as {}", username);
            tracing::debug!("Navigating to {}", route);
        }
        Command::Register {
            email,
            password,
            full_name,
        } => {
            pages::auth::register(&services.auth, &email, &password, &full_name)
                .await
                .map_err(notice_error)?;
            println!("Registered and logged in as {}", email);
        }
        Command::Logout => {
            layout::logout(&services.auth);
            println!("Logged out");
        }
        Command::Whoami => {
            print_header(services).await;
            let user = services.auth.current_user().await?;
            println!("{} <{}>", user.full_name, user.email);
        }
        Command::Profile {
            email,
            full_name,
            password,
        } => {
            let update = UserUpdate {
                email,
                full_name,
                password,
            };
            if !update.has_changes() {
                bail!("Nothing to update");
            }
            let user = services.auth.update_profile(&update).await?;
            println!("Updated {} <{}>", user.full_name, user.email);
        }
        Command::Dashboard => {
            print_header(services).await;
            let view = dashboard::load(&services.blog).await.map_err(notice_error)?;
            for (label, value) in view.stats.cards() {
                println!("{:<16} {}", label, value);
            }
            println!();
            println!("Recent Posts");
            if view.recent().is_empty() {
                println!("  No posts yet. Upload a document to get started.");
            }
            for post in view.recent() {
                print_post_line(post);
            }
        }
        Command::List => {
            let view = dashboard::load(&services.blog).await.map_err(notice_error)?;
            for post in &view.posts {
                print_post_line(post);
            }
        }
        Command::Upload { file, prompt } => {
            let document = Document::from_path(&file).await?;
            println!(
                "Uploading {} (PDF, DOC or DOCX, up to {})",
                document.file_name,
                config.upload.size_hint()
            );
            let outcome = upload::submit(services, &document, &prompt)
                .await
                .map_err(notice_error)?;
            println!("{}", outcome.notice);
            print_post(&outcome.post);
            println!("Open it with: draftdesk preview {}", outcome.post.id);
        }
        Command::Preview { id } => {
            let view = pages::preview::load(services, id.as_deref()).await;
            match view {
                PreviewView::Post(post) => print_post(&post),
                other => bail!("{}", other.message().unwrap_or("Blog post not found")),
            }
        }
        Command::Edit {
            id,
            title,
            content,
            summary,
            keywords,
            status,
        } => {
            let update = BlogPostUpdate {
                title,
                content,
                summary,
                keywords,
                image_url: None,
                status,
            };
            if !update.has_changes() {
                bail!("Nothing to update");
            }
            let post = services
                .blog
                .update(id, &update)
                .await
                .with_context(|| format!("Failed to update blog post {}", id))?;
            print_post(&post);
        }
        Command::GenerateImage { id } => {
            let post = load_post(services, id).await?;
            let (post, notice) = pages::preview::generate_image(services, &post)
                .await
                .map_err(notice_error)?;
            println!("{}", notice);
            if let Some(url) = &post.image_url {
                println!("{}", url);
            }
        }
        Command::Publish { id } => {
            let post = load_post(services, id).await?;
            let (post, notice, _) = pages::preview::publish(services, &post)
                .await
                .map_err(notice_error)?;
            println!("{}", notice);
            if let Some(wordpress_id) = post.wordpress_post_id {
                println!("WordPress post id: {}", wordpress_id);
            }
        }
        Command::Delete { id } => {
            services
                .blog
                .delete(id)
                .await
                .with_context(|| format!("Failed to delete blog post {}", id))?;
            println!("Deleted blog post {}", id);
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = pages::settings::load(services).await;
                print_settings(&settings);
            }
            SettingsAction::Save(args) => {
                let mut settings = pages::settings::load(services).await;
                args.apply(&mut settings)?;
                let (saved, notice) = pages::settings::save(services, &settings)
                    .await
                    .map_err(notice_error)?;
                println!("{}", notice);
                print_settings(&saved);
            }
            SettingsAction::Test(args) => {
                let mut settings = pages::settings::load(services).await;
                args.apply(&mut settings)?;
                let notice = pages::settings::test_connection(services, &settings).await;
                if notice.is_error() {
                    bail!("{}", notice);
                }
                println!("{}", notice);
            }
        },
    }
    Ok(())
}

async fn load_post(services: &Services, id: i64) -> Result<BlogPost> {
    let id = id.to_string();
    match pages::preview::load(services, Some(id.as_str())).await {
        PreviewView::Post(post) => Ok(post),
        other => bail!("{}", other.message().unwrap_or("Blog post not found")),
    }
}

fn notice_error(notice: Notice) -> anyhow::Error {
    anyhow::Error::msg(notice.message().to_string())
}

async fn print_header(services: &Services) {
    let label = layout::header_label(&services.auth).await;
    let nav: Vec<&str> = pages::NAV_ITEMS.iter().map(|(name, _)| *name).collect();
    println!("{} | {}", label, nav.join(" · "));
    println!();
}

fn print_post_line(post: &BlogPost) {
    let created = post
        .created_at
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("  #{:<5} {:<10} {:<10} {}", post.id, post.status.as_str(), created, post.title);
}

fn print_post(post: &BlogPost) {
    println!("# {}", post.title);
    println!("id: {}  status: {}", post.id, post.status);
    if !post.keywords.is_empty() {
        println!("keywords: {}", post.keywords.join(", "));
    }
    if let Some(url) = &post.image_url {
        println!("image: {}", url);
    }
    if !post.summary.is_empty() {
        println!();
        println!("{}", post.summary);
    }
    println!();
    println!("{}", post.content);
}

fn print_settings(settings: &WordPressSettings) {
    let or_unset = |value: &str| {
        if value.is_empty() {
            "(not set)".to_string()
        } else {
            value.to_string()
        }
    };
    println!("Site URL:             {}", or_unset(&settings.site_url));
    println!("Username:             {}", or_unset(&settings.username));
    println!("Application password: {}", or_unset(&settings.masked_password()));
    println!("Post type:            {}", settings.post_type);
    println!("Post status:          {}", settings.post_status);
}
