mod sensor_reading;

pub use sensor_reading::{SensorReading, SensorStatus};
