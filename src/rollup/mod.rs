pub mod aggregate;
pub mod bucket;
pub mod category;
pub mod config;
pub mod dates;
pub mod duration;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod tags;
pub mod tree;
pub mod util;
pub mod warn;
