pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Decrypt, Encrypt, Init, Keygen, Pubkey, Version};
