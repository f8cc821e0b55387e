#![allow(unused_imports)]

pub(crate) mod test_server;
pub(crate) mod token_helper;

pub use test_server::*;
pub use token_helper::*;
