extern crate csv;
extern crate flate2;
extern crate itertools;
extern crate num_format;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate toml;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod aggregate;
pub mod chart;
pub mod configuration;
pub mod defs;
pub mod error;
pub mod menu;
pub mod output;
pub mod query;
pub mod results;
