use log::*;
use steamconf::{transport::Transport, ConfirmationExecutor};

use crate::account::AccountFile;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "List pending mobile confirmations")]
pub struct ListCommand;

impl<T> AccountCommand<T> for ListCommand
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		account: &AccountFile,
	) -> anyhow::Result<()> {
		info!("{}: Checking for confirmations", account.account_name);
		let confirmations = match executor.list() {
			Ok(confirmations) => confirmations,
			Err(ConfirmerError::ConfirmationExpected) => vec![],
			Err(err) => {
				error!("Failed to get confirmations: {}", err);
				return Err(err.into());
			}
		};

		if confirmations.is_empty() {
			info!("{}: No confirmations", account.account_name);
			return Ok(());
		}

		for conf in &confirmations {
			println!(
				"{}\t{}\t{}",
				conf.id,
				conf.creation_time.format("%Y-%m-%d %H:%M:%S"),
				conf.description()
			);
			if let Some(warning) = &conf.warn {
				warn!("{}: {}", conf.id, warning);
			}
		}
		Ok(())
	}
}
