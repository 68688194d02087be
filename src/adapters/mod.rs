pub mod controllers;
pub mod dto;
pub mod error;
pub mod repositories;
pub mod router;
pub mod state;
pub mod views;
