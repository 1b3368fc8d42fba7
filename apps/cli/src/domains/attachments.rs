use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use planka_api::attachments;
use serde_json::json;

use crate::{context::Context, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum AttachmentsCmd {
	/// Upload a local file to a card
	Upload { card_id: String, file: PathBuf },
	/// Download a URL and attach it to a card
	UploadFromUrl {
		card_id: String,
		url: String,
		/// Name to upload under instead of one derived from the URL
		#[arg(long)]
		file_name: Option<String>,
	},
	/// Delete an attachment
	Delete { id: String },
	/// List the attachments of a card
	List { card_id: String },
}

pub async fn run(ctx: &Context, cmd: AttachmentsCmd) -> Result<()> {
	match cmd {
		AttachmentsCmd::Upload { card_id, file } => {
			print_json(&attachments::upload(&ctx.config, &card_id, &file).await?)
		}
		AttachmentsCmd::UploadFromUrl {
			card_id,
			url,
			file_name,
		} => print_json(
			&attachments::upload_from_url(&ctx.config, &card_id, &url, file_name.as_deref()).await?,
		),
		AttachmentsCmd::Delete { id } => {
			attachments::delete(&ctx.config, &id).await?;
			print_json(&json!({ "id": id, "deleted": true }))
		}
		AttachmentsCmd::List { card_id } => {
			print_json(&attachments::list(&ctx.config, &card_id).await?)
		}
	}
}
