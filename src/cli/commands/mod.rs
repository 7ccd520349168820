pub mod generate;
pub mod hubs;
pub mod inspect;
