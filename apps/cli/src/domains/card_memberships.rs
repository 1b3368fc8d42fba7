use anyhow::Result;
use clap::Subcommand;
use planka_api::card_memberships;

use crate::{context::Context, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum CardMembershipsCmd {
	/// Add a user to a card
	Add { card_id: String, user_id: String },
	/// Remove a user from a card
	Remove { card_id: String, user_id: String },
	/// List the members of a card with their users
	List { card_id: String },
}

pub async fn run(ctx: &Context, cmd: CardMembershipsCmd) -> Result<()> {
	match cmd {
		CardMembershipsCmd::Add { card_id, user_id } => {
			print_json(&card_memberships::add(&ctx.config, &card_id, &user_id).await?)
		}
		CardMembershipsCmd::Remove { card_id, user_id } => {
			print_json(&card_memberships::remove(&ctx.config, &card_id, &user_id).await?)
		}
		CardMembershipsCmd::List { card_id } => {
			print_json(&card_memberships::list(&ctx.config, &card_id).await?)
		}
	}
}
