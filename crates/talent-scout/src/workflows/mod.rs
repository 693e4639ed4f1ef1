pub mod discovery;
pub mod filing;
pub mod screening;
