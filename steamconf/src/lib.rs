//! Finds and responds to Steam mobile confirmations.
//!
//! Steam requires trade offers, market listings and Web API key requests to be confirmed from the
//! mobile authenticator. This crate signs requests with the account's identity secret, lists the
//! pending confirmations, works out which one belongs to a given trade offer, listing or API key
//! request, and then accepts or denies it.
//!
//! Logging in and keeping the session cookies fresh is left to the caller. Hand a
//! [`transport::WebTransport`] a cookie jar that already holds a logged in session.

pub use actuator::{ActuationResult, ConfirmationAction, ConfirmationActuator};
pub use client::MobileConfClient;
pub use confirmation::{Confirmation, ConfirmationType};
pub use errors::ConfirmerError;
pub use executor::ConfirmationExecutor;
pub use extractor::{IdentifierExtractor, ListingExtractor, TradeOfferExtractor};
pub use fetcher::ConfirmationFetcher;
pub use matcher::{ConfirmationMatcher, Criterion};
pub use signing::{Clock, IdentitySecret, SigningProvider, SteamGuardSigner, SystemClock};

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate anyhow;

mod actuator;
mod client;
mod confirmation;
mod errors;
mod executor;
mod extractor;
mod fetcher;
mod matcher;
pub mod signing;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
