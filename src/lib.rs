// Cinematch: movie recommendations from rating data
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: input relations -> rating matrix -> recommenders -> output.

pub mod config;
pub mod context;
pub mod dataset;
pub mod matrix;
pub mod output;
pub mod recommend;
pub mod status;
