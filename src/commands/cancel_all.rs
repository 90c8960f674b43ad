use crossterm::tty::IsTty;
use log::*;
use steamconf::{transport::Transport, ConfirmationExecutor};

use crate::{account::AccountFile, errors::UserError, tui};

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Deny every pending mobile confirmation")]
pub struct CancelAllCommand {
	#[clap(short, long, help = "Don't ask before cancelling.")]
	pub yes: bool,
}

impl<T> AccountCommand<T> for CancelAllCommand
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		account: &AccountFile,
	) -> anyhow::Result<()> {
		if !self.yes {
			if !std::io::stdin().is_tty() {
				bail!("Refusing to cancel all confirmations without --yes when not running interactively.");
			}
			let answer = tui::prompt_char(
				&format!(
					"Cancel all pending confirmations for {}?",
					account.account_name
				),
				"yN",
			)?;
			if answer != 'y' {
				return Err(UserError::Aborted.into());
			}
		}

		match executor.cancel_all() {
			Ok(results) => report_cancellations(&account.account_name, &results),
			Err(ConfirmerError::ConfirmationExpected) => {
				bail!("A confirmation could not be cancelled, the remaining ones were left pending.")
			}
			Err(err) => Err(err.into()),
		}
	}
}

fn report_cancellations(account_name: &str, results: &[ActuationResult]) -> anyhow::Result<()> {
	let refused = results.iter().filter(|r| !r.success).count();
	info!(
		"{}: Cancelled {} confirmations",
		account_name,
		results.len() - refused
	);
	if refused > 0 {
		bail!("Steam refused to cancel {} of {} confirmations", refused, results.len());
	}
	Ok(())
}
