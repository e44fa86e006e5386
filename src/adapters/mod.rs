pub mod cloudformation;
pub mod storage;
