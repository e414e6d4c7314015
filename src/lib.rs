pub mod adapter;
pub mod api;
pub mod cli;
pub mod collection;
pub mod config;
pub mod display;
pub mod form;
pub mod macros;
pub mod model;
pub mod notice;
pub mod resolver;
