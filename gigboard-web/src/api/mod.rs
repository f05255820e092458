//! HTTP handlers for gigboard-web

pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;
