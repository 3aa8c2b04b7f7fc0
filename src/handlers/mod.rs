pub mod auth;
pub mod helpers;
pub mod middleware;
pub mod pages;
