pub mod db;
pub mod deal_interactor;
pub mod pair_interactor;
pub mod repository;
pub mod user_interactor;
