pub mod binary;
pub mod conserve;
pub mod error;
pub mod io;
pub mod matrix;
pub mod scan;
pub mod threshold;
