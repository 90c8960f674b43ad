use clap::Parser;
use log::*;
use reqwest::Url;
use std::path::PathBuf;
use steamconf::transport::WebTransport;

#[macro_use]
extern crate anyhow;

mod account;
mod commands;
mod errors;
mod tui;

use account::AccountFile;
use commands::{Args, CommandType};

fn main() {
	std::process::exit(match run() {
		Ok(_) => 0,
		Err(e) => {
			error!("{:?}", e);
			255
		}
	});
}

fn run() -> anyhow::Result<()> {
	let args = Args::parse();
	stderrlog::new()
		.verbosity(args.global.verbosity as usize)
		.module(module_path!())
		.module("steamconf")
		.init()?;
	debug!("{:?}", args);

	let cmd: CommandType<WebTransport> = args.sub.into();
	match cmd {
		CommandType::Const(cmd) => cmd.execute(),
		CommandType::Account(cmd) => {
			let path = args
				.global
				.account
				.map(PathBuf::from)
				.unwrap_or_else(account::default_account_path);
			let account = AccountFile::load(&path)?;
			let base_url = parse_base_url(args.global.base_url.as_deref())?;
			let executor = account.build_executor(base_url)?;
			debug!("account {} loaded from {}", account.account_name, path.display());
			cmd.execute(&executor, &account)
		}
	}
}

fn parse_base_url(base_url: Option<&str>) -> anyhow::Result<Option<Url>> {
	base_url
		.map(|url| {
			url.trim_end_matches('/')
				.parse::<Url>()
				.map_err(|e| anyhow!("Invalid base url {:?}: {}", url, e))
		})
		.transpose()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_base_url() {
		assert_eq!(parse_base_url(None).unwrap(), None);
		let url = parse_base_url(Some("http://127.0.0.1:1234/mobileconf/"))
			.unwrap()
			.unwrap();
		assert_eq!(url.as_str(), "http://127.0.0.1:1234/mobileconf");
		assert!(parse_base_url(Some("not a url")).is_err());
	}
}
