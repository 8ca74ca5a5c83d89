pub mod compare;
pub mod history;
pub mod models;
pub mod price;
pub mod setup;
pub mod ui;
