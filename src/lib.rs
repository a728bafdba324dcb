pub mod charts;
pub mod db;
pub mod models;
pub mod refresh;
pub mod scheduler;
pub mod ui;
pub mod view;

pub use ui::run;
