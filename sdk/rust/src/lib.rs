//! Client SDK for HTTP quest.
//!
//! [`QuestClient`] speaks every level's protocol and can walk the whole
//! quest on its own with [`QuestClient::solve`].

mod client;

pub use client::{ClientError, QuestClient, Walkthrough, LEVEL_COUNT, MASK_ALPHABET};
