mod customer;
mod favorite;

pub use customer::CustomerService;
pub use favorite::FavoriteOrchestrator;
