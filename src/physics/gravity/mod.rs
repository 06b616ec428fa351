pub mod tilt;
