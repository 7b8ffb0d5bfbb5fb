pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod search;
pub mod shopping_list;
