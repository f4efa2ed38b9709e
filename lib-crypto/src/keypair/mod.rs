//! KeyPair management module

pub mod generation;

pub use generation::SigningKeyPair;
