pub mod export;
pub mod frame;
pub mod import;
pub mod info;
pub mod new;
pub mod recent;
pub mod validate;
