pub mod cli;
pub mod input;
pub mod palette;
pub mod phylogeny;
pub mod run;
pub mod utils;
