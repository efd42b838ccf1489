pub mod hedge_crossover;

pub use hedge_crossover::{classify, generate, CrossoverPoint, HedgeRatioCrossover};
