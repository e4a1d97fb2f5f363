pub mod app;
pub mod catalog;
pub mod data;
pub mod embed;
pub mod model;
pub mod quiz;
pub mod storage;
pub mod ui;
pub mod view_models;

pub use app::PlayerApp;
