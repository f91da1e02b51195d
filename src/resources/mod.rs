//! Concrete BitGo resources.
//!
//! Each resource is a [`ResourceKind`](crate::resource::ResourceKind) marker holding the
//! endpoint table, plus an alias of [`Resource`](crate::resource::Resource) with typed accessors
//! for the properties BitGo documents.

mod keychain;
mod pending_approval;
mod wallet;
mod wallet_share;

pub use keychain::{Keychain, KeychainKind};
pub use pending_approval::{ApprovalState, PendingApproval, PendingApprovalKind};
pub use wallet::{Wallet, WalletKind};
pub use wallet_share::{WalletShare, WalletShareKind};
