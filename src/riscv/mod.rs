pub mod entry;
pub mod intrinsic;
