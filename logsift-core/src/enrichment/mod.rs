//! Network-identity enrichment
//!
//! Two stages run over each chunk of records:
//!
//! - [`identity`] resolves every distinct client key once (reverse hostname and
//!   containing supernet) on a bounded worker pool, then copies the results
//!   onto every record that shares the key.
//! - [`bot`] checks the resolved hostname against the trusted-crawler pattern,
//!   which separates real crawlers from clients that only claim to be one in
//!   their user agent.

pub mod bot;
pub mod identity;


pub use bot::{BotSummary, TrustedHosts, validate};
pub use identity::{
    HostLookup, IdentityResolver, LookupKind, LookupSummary, ResolveOptions, ResolveSummary,
    SystemLookup,
};
