//! Demo coaching domain exercising the [beanery_di] container: two
//! interchangeable fortune providers disambiguated by qualifier, a coach
//! depending on one of them, and the wiring registering everything.

pub mod coach;
pub mod fortune;
pub mod wiring;
