use log::*;
use steamconf::{transport::Transport, ConfirmationExecutor};

use crate::account::AccountFile;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Approve the mobile confirmation for a trade offer")]
pub struct TradeCommand {
	#[clap(value_name = "TRADE_OFFER_ID", help = "The id of the trade offer to confirm.")]
	pub trade_offer_id: String,
}

impl<T> AccountCommand<T> for TradeCommand
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		account: &AccountFile,
	) -> anyhow::Result<()> {
		info!(
			"{}: Looking for the confirmation for trade offer {}",
			account.account_name, self.trade_offer_id
		);
		finish_approval(
			&format!("trade offer {}", self.trade_offer_id),
			executor.approve_trade_offer(&self.trade_offer_id),
		)
	}
}
