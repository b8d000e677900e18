pub mod auth;
pub mod health;
pub mod loans;
pub mod members;
pub mod pages;
pub mod registration;
