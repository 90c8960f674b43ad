use steamconf::{transport::Transport, ConfirmationExecutor};

use crate::account::AccountFile;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Approve a pending Web API key request")]
pub struct ApiKeyCommand {
	#[clap(value_name = "REQUEST_ID", help = "The id of the API key request.")]
	pub request_id: String,
}

impl<T> AccountCommand<T> for ApiKeyCommand
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		_account: &AccountFile,
	) -> anyhow::Result<()> {
		finish_approval(
			&format!("API key request {}", self.request_id),
			executor.approve_api_key_request(&self.request_id),
		)
	}
}
