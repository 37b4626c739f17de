#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod controller;
pub mod dto;
pub mod store;
