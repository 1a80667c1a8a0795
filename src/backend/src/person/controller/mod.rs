mod person_create;
mod person_delete;
mod person_get;
mod person_list;
mod person_update;

pub use person_create::person_create;
pub use person_delete::person_delete;
pub use person_get::person_get;
pub use person_list::person_list;
pub use person_update::person_update;
