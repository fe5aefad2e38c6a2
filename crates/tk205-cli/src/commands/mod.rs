pub mod calc;
pub mod inspect;
pub mod translate;
pub mod validate;
