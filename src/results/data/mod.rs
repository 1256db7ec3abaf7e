pub mod load;
pub mod rows;
