pub mod books;
pub mod citation;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod references;
pub mod settings;
pub mod store;
pub mod translate;
pub mod ui;
