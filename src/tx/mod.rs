//! Transaction Module
//!
//! Sign document construction, scheduled signers, and the signing /
//! broadcast pipeline.

mod builder;
mod sign_doc;
mod signer;

pub use builder::*;
pub use sign_doc::*;
pub use signer::*;
