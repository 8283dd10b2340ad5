//! Brokered credentials for remote capability providers
//!
//! - `CredentialStore` - scoped key-value storage (memory or file backed)
//! - `TokenExchanger` - RFC 8693 token exchange against the MCP base URL
//! - `CredentialBroker` - cache lookup, expiry check, re-exchange, cache write

mod broker;
mod exchange;
mod file_store;
mod store;

pub use broker::CredentialBroker;
pub use exchange::{ExchangeError, TokenExchange, TokenExchanger, EXCHANGE_CLIENT_ID};
pub use file_store::FileCredentialStore;
pub use store::{
    CredentialKey, CredentialStore, MemoryCredentialStore, StoredCredential, TokenPayload,
    TOKEN_NAMESPACE,
};
