pub mod categories;
pub mod products;
pub mod staple_definitions;
pub mod units;
pub mod users;

pub use categories::Entity as Categories;
pub use products::Entity as Products;
pub use staple_definitions::Entity as StapleDefinitions;
pub use units::Entity as Units;
pub use users::Entity as Users;
