//! Domain layer of the state store.

pub mod app_hash;
pub mod codec;
pub mod context;
pub mod errors;
pub mod keys;

pub use app_hash::{chain_app_hash, AppHash, GENESIS_APP_HASH};
pub use codec::{decode_record, encode_record};
pub use context::{QueryContext, TxContext};
pub use errors::StoreError;
pub use keys::StateKey;
