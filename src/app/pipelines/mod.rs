pub mod radar_pipeline;

pub use radar_pipeline::RadarPipeline;
