pub mod configuration;
pub mod dal;
pub mod domain;
pub mod handler;
pub mod services;
pub mod startup;
