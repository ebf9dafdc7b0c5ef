// Business logic layer between route handlers and storage

mod cart;
mod order;
mod plant;
mod user;

pub use cart::CartService;
pub use order::OrderService;
pub use plant::PlantService;
pub use user::UserService;
