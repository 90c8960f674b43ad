use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use log::*;
use std::str::FromStr;
use steamconf::{transport::Transport, ActuationResult, ConfirmationExecutor, ConfirmerError};

use crate::account::AccountFile;

pub mod api_key;
pub mod cancel_all;
pub mod completions;
pub mod list;
pub mod listing;
pub mod trade;

pub use api_key::ApiKeyCommand;
pub use cancel_all::CancelAllCommand;
pub use completions::CompletionsCommand;
pub use list::ListCommand;
pub use listing::ListingCommand;
pub use trade::TradeCommand;

/// A command that does not need an account.
pub(crate) trait ConstCommand {
	fn execute(&self) -> anyhow::Result<()>;
}

/// A command that works on the pending confirmations of one account.
pub(crate) trait AccountCommand<T>
where
	T: Transport,
{
	fn execute(
		&self,
		executor: &ConfirmationExecutor<T>,
		account: &AccountFile,
	) -> anyhow::Result<()>;
}

pub(crate) enum CommandType<T: Transport> {
	Const(Box<dyn ConstCommand>),
	Account(Box<dyn AccountCommand<T>>),
}

#[derive(Debug, Clone, Parser)]
#[clap(name="steamconf-cli", bin_name="steamconf", author, version, about = "Approve Steam trade offers, market listings and API key requests from the command line.", long_about = None)]
pub(crate) struct Args {
	#[clap(flatten)]
	pub global: GlobalArgs,

	#[clap(subcommand)]
	pub sub: Subcommands,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct GlobalArgs {
	#[clap(
		short,
		long,
		env = "STEAMCONF_ACCOUNT",
		help = "Path to the account's maFile.",
		long_help = "Path to the account's maFile. It must contain the identity_secret and a logged in Session. Default: ~/.config/steamconf/account.maFile"
	)]
	pub account: Option<String>,
	#[clap(
		long,
		env = "STEAMCONF_BASE_URL",
		hide = true,
		help = "Override the mobileconf base URL."
	)]
	pub base_url: Option<String>,
	#[clap(short, long, value_enum, default_value_t=Verbosity::Info, help = "Set the log level. Be warned, trace is capable of printing sensitive data.")]
	pub verbosity: Verbosity,
}

#[derive(Debug, Clone, Parser)]
pub(crate) enum Subcommands {
	List(ListCommand),
	Trade(TradeCommand),
	Listing(ListingCommand),
	ApiKey(ApiKeyCommand),
	CancelAll(CancelAllCommand),
	Completion(CompletionsCommand),
}

impl<T> From<Subcommands> for CommandType<T>
where
	T: Transport,
{
	fn from(sub: Subcommands) -> Self {
		match sub {
			Subcommands::List(args) => CommandType::Account(Box::new(args)),
			Subcommands::Trade(args) => CommandType::Account(Box::new(args)),
			Subcommands::Listing(args) => CommandType::Account(Box::new(args)),
			Subcommands::ApiKey(args) => CommandType::Account(Box::new(args)),
			Subcommands::CancelAll(args) => CommandType::Account(Box::new(args)),
			Subcommands::Completion(args) => CommandType::Const(Box::new(args)),
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Verbosity {
	Error = 0,
	Warn = 1,
	Info = 2,
	Debug = 3,
	Trace = 4,
}

impl std::fmt::Display for Verbosity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!(
			"{}",
			match self {
				Verbosity::Error => "error",
				Verbosity::Warn => "warn",
				Verbosity::Info => "info",
				Verbosity::Debug => "debug",
				Verbosity::Trace => "trace",
			}
		))
	}
}

impl FromStr for Verbosity {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"error" => Ok(Verbosity::Error),
			"warn" => Ok(Verbosity::Warn),
			"info" => Ok(Verbosity::Info),
			"debug" => Ok(Verbosity::Debug),
			"trace" => Ok(Verbosity::Trace),
			_ => Err(anyhow!("Invalid verbosity level: {}", s)),
		}
	}
}

/// Shared ending for the approve commands.
pub(crate) fn finish_approval(
	what: &str,
	result: Result<ActuationResult, ConfirmerError>,
) -> anyhow::Result<()> {
	match result {
		Ok(result) if result.success => {
			info!("Approved {}", what);
			Ok(())
		}
		Ok(result) => {
			debug!("ajaxop result: {:?}", result);
			bail!("Steam refused to approve {}", what)
		}
		Err(ConfirmerError::ConfirmationExpected) => {
			bail!("No pending confirmation found for {}", what)
		}
		Err(ConfirmerError::InvalidCredentials) => {
			error!("The identity_secret in the account file is not valid for this account. It needs to be replaced, retrying won't help.");
			Err(ConfirmerError::InvalidCredentials.into())
		}
		Err(err) => Err(err.into()),
	}
}
