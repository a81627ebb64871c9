pub mod discovery;
pub mod moods;
pub mod providers;
pub mod recommendations;
pub mod search;
