pub mod debounce;
pub mod error;
pub mod quote;
pub mod submit;
pub mod wallet;

pub use error::SwapError;
pub use quote::{QuoteController, QuoteSnapshot};
pub use submit::SwapSubmitter;
pub use wallet::{KeypairWallet, WalletAdapter};
