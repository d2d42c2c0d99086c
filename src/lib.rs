pub mod cli;
pub mod config;
pub mod credentials;
pub mod filter;
pub mod github;
pub mod logging;
pub mod output;
pub mod report;
pub mod repository;
pub mod run;
