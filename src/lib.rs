pub mod api;
pub mod availability;
pub mod calendar;
pub mod config;
pub mod handler;
pub mod model;
pub mod notification;
pub mod render;
