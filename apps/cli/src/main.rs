use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use planka_api::{default_temp_dir, Config, Credentials, RequestConfig};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

mod context;
mod domains;
mod util;

use context::Context;
use domains::{
	actions::ActionsCmd, attachments::AttachmentsCmd, card_memberships::CardMembershipsCmd,
	notifications::NotificationsCmd, users::UsersCmd,
};

const DEFAULT_LOG_DIRECTIVES: [&str; 3] = ["warn", "planka_api=info", "planka=info"];
const VERBOSE_LOG_DIRECTIVES: [&str; 3] = ["warn", "planka_api=debug", "planka=debug"];

#[derive(Parser, Debug)]
#[command(name = "planka", about = "Planka kanban client")]
struct Cli {
	/// Planka server URL
	#[arg(long, env = "PLANKA_BASE_URL")]
	base_url: Url,

	/// Email or username to log in with
	#[arg(long, env = "PLANKA_AGENT_EMAIL")]
	email: String,

	#[arg(long, env = "PLANKA_AGENT_PASSWORD", hide_env_values = true)]
	password: String,

	/// Where URL uploads stage their downloads
	#[arg(long, env = "PLANKA_TEMP_DIR")]
	temp_dir: Option<PathBuf>,

	/// Log at debug level
	#[arg(long, short, default_value_t = false)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Card attachments
	#[command(subcommand)]
	Attachments(AttachmentsCmd),
	/// Card activity
	#[command(subcommand)]
	Actions(ActionsCmd),
	/// Card members
	#[command(subcommand)]
	CardMemberships(CardMembershipsCmd),
	/// User directory
	#[command(subcommand)]
	Users(UsersCmd),
	/// Notifications of the logged in user
	#[command(subcommand)]
	Notifications(NotificationsCmd),
}

fn init_logging(verbose: bool) -> Result<()> {
	let directives = if verbose {
		VERBOSE_LOG_DIRECTIVES
	} else {
		DEFAULT_LOG_DIRECTIVES
	};

	let filter = directives
		.into_iter()
		.try_fold(EnvFilter::from_default_env(), |filter, directive| {
			directive.parse().map(|directive| filter.add_directive(directive))
		})?;

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.try_init()?;

	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	init_logging(cli.verbose)?;

	let config = Config::new(
		cli.base_url,
		Credentials {
			email_or_username: cli.email,
			password: cli.password,
		},
	)
	.with_temp_dir(cli.temp_dir.unwrap_or_else(default_temp_dir));

	debug!(base_url = %config.base_url, temp_dir = %config.temp_dir.display(), "Starting");

	let ctx = Context::new(RequestConfig::from_config(&config)?);

	match cli.command {
		Commands::Attachments(cmd) => domains::attachments::run(&ctx, cmd).await,
		Commands::Actions(cmd) => domains::actions::run(&ctx, cmd).await,
		Commands::CardMemberships(cmd) => domains::card_memberships::run(&ctx, cmd).await,
		Commands::Users(cmd) => domains::users::run(&ctx, cmd).await,
		Commands::Notifications(cmd) => domains::notifications::run(&ctx, cmd).await,
	}
}
