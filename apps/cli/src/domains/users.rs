use anyhow::Result;
use clap::Subcommand;
use planka_api::users;

use crate::{context::Context, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum UsersCmd {
	/// List every user
	List,
	/// Show a single user
	Get { id: String },
	/// Users whose name contains the query, ignoring case
	SearchByName { name: String },
	/// Users with exactly this email, ignoring case
	SearchByEmail { email: String },
	/// Users with exactly this username, ignoring case
	SearchByUsername { username: String },
	/// Id of the first user whose name matches
	IdByName { name: String },
}

pub async fn run(ctx: &Context, cmd: UsersCmd) -> Result<()> {
	match cmd {
		UsersCmd::List => print_json(&users::list(&ctx.config).await?),
		UsersCmd::Get { id } => print_json(&users::get(&ctx.config, &id).await?),
		UsersCmd::SearchByName { name } => {
			print_json(&users::search_by_name(&ctx.config, &name).await?)
		}
		UsersCmd::SearchByEmail { email } => {
			print_json(&users::search_by_email(&ctx.config, &email).await?)
		}
		UsersCmd::SearchByUsername { username } => {
			print_json(&users::search_by_username(&ctx.config, &username).await?)
		}
		UsersCmd::IdByName { name } => {
			print_json(&users::get_id_by_name(&ctx.config, &name).await?)
		}
	}
}
