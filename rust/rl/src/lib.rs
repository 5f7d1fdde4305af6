extern crate ndarray;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod algos;
pub mod config;
pub mod episode;
pub mod error;
pub mod render;
pub mod tables;

pub use algos::model_based::{action_values, vi::*, MdpSolver, MdpSolverPolicy};
pub use algos::model_free::{exploring_starts::*, monte_carlo::*};
pub use config::RunConfig;
pub use episode::*;
pub use error::{Result, RlError};
pub use tables::*;
