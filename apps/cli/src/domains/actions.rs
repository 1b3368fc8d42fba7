use anyhow::Result;
use clap::Subcommand;
use planka_api::actions;

use crate::{context::Context, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum ActionsCmd {
	/// List the actions of a card
	List { card_id: String },
	/// Show a single action
	Get { id: String },
	/// Counts per type plus the most recent actions of a card
	Summary { card_id: String },
}

pub async fn run(ctx: &Context, cmd: ActionsCmd) -> Result<()> {
	match cmd {
		ActionsCmd::List { card_id } => print_json(&actions::list(&ctx.config, &card_id).await?),
		ActionsCmd::Get { id } => print_json(&actions::get(&ctx.config, &id).await?),
		ActionsCmd::Summary { card_id } => {
			print_json(&actions::summary(&ctx.config, &card_id).await?)
		}
	}
}
