use log::*;
use steamconf::{transport::Transport, ConfirmationExecutor};

use crate::account::AccountFile;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Approve the mobile confirmation for a market sell listing")]
pub struct ListingCommand {
	#[clap(value_name = "ASSET_ID", help = "The asset id of the item being listed.")]
	pub asset_id: String,
}

impl<T> AccountCommand<T> for ListingCommand
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		account: &AccountFile,
	) -> anyhow::Result<()> {
		info!(
			"{}: Looking for the listing confirmation for asset {}",
			account.account_name, self.asset_id
		);
		finish_approval(
			&format!("listing of asset {}", self.asset_id),
			executor.approve_sell_listing(&self.asset_id),
		)
	}
}
