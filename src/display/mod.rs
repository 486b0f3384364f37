pub mod mana;
pub mod output;
