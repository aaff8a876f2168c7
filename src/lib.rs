pub mod assets;
pub mod board;
pub mod clock;
pub mod config;
pub mod fruit;
pub mod game;
pub mod input;
pub mod logging;
pub mod score;
pub mod screen;
pub mod snake;
pub mod sparse_set;
pub mod term;

pub type TermInt = u16;

pub type Coords = (i16, i16);
