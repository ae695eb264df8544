//! Stock transfers between placements

pub mod validator;

pub use validator::TransferValidator;
