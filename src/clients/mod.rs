pub mod ears_client;
pub mod oracle;

pub use ears_client::HttpOracle;
pub use oracle::{Modifiers, Oracle, Probe};
