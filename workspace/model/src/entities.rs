//! SeaORM entity modules for the cooperative backend.
//! Two tables: members (`users`) and their monthly loan requests
//! (`peminjaman`). Column names follow the existing database layout,
//! including the camel-cased `DateMonth`, `DateYear` and `userID`.

pub mod loan;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::loan::Entity as Loan;
    pub use super::user::Entity as User;
}
