pub mod article;
pub mod auth;
pub mod wordpress_site;
