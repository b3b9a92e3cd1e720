pub mod enums;
pub mod filters;
mod hospital;
mod person;
mod staff;

pub use filters::*;
pub use hospital::*;
pub use person::*;
pub use staff::*;
