//! Background conversion on a dedicated thread.
//!
//! Front ends that must stay responsive hand the image to a
//! [`ConversionTask`] and poll or join it later. The task owns its image and
//! parameters, so nothing is shared with the caller while it runs.

use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::convert::{convert_with_options, ConvertError};
use crate::decode::DecodedImage;
use crate::encode::SvgOptions;
use crate::ConversionParams;

/// A conversion running on its own thread.
#[derive(Debug)]
pub struct ConversionTask {
    handle: JoinHandle<Result<String, ConvertError>>,
}

impl ConversionTask {
    /// Start converting `image` with default output options.
    pub fn spawn(image: DecodedImage, params: ConversionParams) -> Self {
        Self::spawn_with_options(image, params, SvgOptions::default())
    }

    /// Start converting `image` with custom output options.
    pub fn spawn_with_options(
        image: DecodedImage,
        params: ConversionParams,
        options: SvgOptions,
    ) -> Self {
        debug!(width = image.width, height = image.height, "spawning conversion worker");
        let handle = thread::spawn(move || convert_with_options(&image, &params, &options));
        Self { handle }
    }

    /// True once the worker has produced a result (or panicked).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker finishes and return its result.
    pub fn join(self) -> Result<String, ConvertError> {
        self.handle
            .join()
            .unwrap_or(Err(ConvertError::WorkerPanicked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert_with_params;

    #[test]
    fn test_task_matches_synchronous_result() {
        let img = DecodedImage::filled(9, 5, [12, 200, 90]);
        let params = ConversionParams::new().with_detail_level(7);

        let expected = convert_with_params(&img, &params).unwrap();
        let task = ConversionTask::spawn(img, params);
        assert_eq!(task.join().unwrap(), expected);
    }

    #[test]
    fn test_task_reports_errors() {
        let img = DecodedImage::new(0, 0, vec![]);
        let task = ConversionTask::spawn(img, ConversionParams::new());
        assert!(matches!(task.join(), Err(ConvertError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_tasks_run_concurrently_on_independent_images() {
        let tasks: Vec<ConversionTask> = (0..4u8)
            .map(|i| {
                let img = DecodedImage::filled(16, 16, [i * 60, 0, 0]);
                ConversionTask::spawn(img, ConversionParams::new().with_num_colors(64))
            })
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            let svg = task.join().unwrap();
            let red = (i as u32 * 60 / 64) * 64;
            assert!(svg.contains(&format!("rgb({},0,0)", red)));
        }
    }

    #[test]
    fn test_is_finished_eventually() {
        let task = ConversionTask::spawn(DecodedImage::filled(2, 2, [0, 0, 0]), ConversionParams::new());
        while !task.is_finished() {
            std::thread::yield_now();
        }
        assert!(task.join().is_ok());
    }
}
