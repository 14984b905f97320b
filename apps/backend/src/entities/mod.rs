pub mod distributions;
pub mod tarot_games;

pub use distributions::Entity as Distributions;
pub use distributions::Model as Distribution;
pub use tarot_games::Entity as TarotGames;
pub use tarot_games::Model as TarotGame;
