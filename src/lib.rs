//! Translate paper abstracts through an OpenAI-compatible chat API and push
//! the digest to a Lark/Feishu webhook.

pub mod cli;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod papers;
pub mod webhook;
