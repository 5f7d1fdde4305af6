pub mod exploring_starts;
pub mod monte_carlo;
