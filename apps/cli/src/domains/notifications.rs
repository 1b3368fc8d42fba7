use anyhow::Result;
use clap::Subcommand;
use planka_api::notifications;
use serde_json::json;

use crate::{context::Context, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum NotificationsCmd {
	/// List notifications
	List,
	/// Show a single notification
	Get { id: String },
	/// Mark the given notifications as read, all or nothing
	MarkRead {
		#[arg(required = true)]
		ids: Vec<String>,
	},
	/// Number of unread notifications
	UnreadCount,
	/// Mark every unread notification as read
	MarkAllRead,
}

pub async fn run(ctx: &Context, cmd: NotificationsCmd) -> Result<()> {
	match cmd {
		NotificationsCmd::List => print_json(&notifications::list(&ctx.config).await?),
		NotificationsCmd::Get { id } => print_json(&notifications::get(&ctx.config, &id).await?),
		NotificationsCmd::MarkRead { ids } => {
			print_json(&notifications::mark_read(&ctx.config, &ids).await?)
		}
		NotificationsCmd::UnreadCount => print_json(&json!({
			"unread": notifications::unread_count(&ctx.config).await?,
		})),
		NotificationsCmd::MarkAllRead => {
			print_json(&notifications::mark_all_read(&ctx.config).await?)
		}
	}
}
