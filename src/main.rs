use crate::cli::run;

pub mod bot;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod matching;
pub mod slack;
pub mod spotify;
pub mod youtube;

fn main() -> anyhow::Result<()> {
    run()
}
