pub mod audio;
pub mod buff_menu;
pub mod drone;
pub mod enemy;
pub mod game_state;
pub mod hud;
pub mod menu;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod setup;
pub mod spawning;
