//! Visitor feedback: public submission, admin listing and removal.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::FeedbackService;
