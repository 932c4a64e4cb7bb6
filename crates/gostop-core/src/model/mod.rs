pub mod capture;
pub mod card;
pub mod deck;
pub mod hand;
pub mod kind;
pub mod month;
pub mod score;
pub mod side;
