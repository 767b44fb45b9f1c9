/// The `save_video` pipeline.
pub mod save;
