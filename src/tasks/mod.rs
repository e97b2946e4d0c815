pub mod ble;
pub mod inference;
pub mod led;
