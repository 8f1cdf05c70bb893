pub mod ages;
pub mod engine;
pub mod events;
pub mod gods;
pub mod names;
pub mod narration;
pub mod population;
