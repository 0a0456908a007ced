pub mod storage;
pub mod telemetry;
