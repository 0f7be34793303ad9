//! Everything that talks to the Fujitsu management console: the Digest
//! authenticated client, the page layouts, and the collectors built on them.

pub mod client;
pub mod collectors;
pub mod digest;
pub mod html_parsing;
pub mod parsers;
pub mod targets;

pub use client::Client;
