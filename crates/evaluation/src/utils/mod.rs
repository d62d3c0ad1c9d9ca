pub mod detection_logger;
pub mod detection_source;
