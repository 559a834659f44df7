//! Photo ingestion: preprocessing and subject compositing.
//!
//! Everything here is CPU-bound. The `*_in_background` variants run the
//! same work on tokio's blocking pool; dropping their future discards the
//! result without touching any page.

use image::RgbaImage;
use lineart::{
    composite_subject, detect_subject, BoundingBox, LineArtOptions, LineArtPreprocessor,
    SubjectOptions,
};

use crate::error::IngestError;
use crate::models::EngineConfig;
use crate::rendering::{decode_rgba, encode_gray_png, encode_png, optimize_png};

/// Output of the subject extraction step.
#[derive(Debug, Clone)]
pub struct SubjectExtraction {
    /// Binary saliency mask at detector resolution (255 = subject)
    pub mask: image::GrayImage,
    /// Subject bounds in photo coordinates
    pub bounds: BoundingBox,
    /// Cropped subject, PNG encoded
    pub subject_png: Vec<u8>,
    pub found: bool,
    pub photo_width: u32,
    pub photo_height: u32,
}

#[derive(Clone)]
pub struct IngestService {
    line_art: LineArtOptions,
    subject: SubjectOptions,
    optimize_png: bool,
}

impl IngestService {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            line_art: config.line_art_options(),
            subject: config.subject_options(),
            optimize_png: config.export.optimize_png,
        }
    }

    pub fn with_options(line_art: LineArtOptions, subject: SubjectOptions) -> Self {
        Self {
            line_art,
            subject,
            optimize_png: false,
        }
    }

    /// Convert a photo into a black-on-white outline PNG.
    ///
    /// Decode failures are surfaced; the caller has nothing to fall back to.
    pub fn preprocess(&self, photo: &[u8], strength: u8) -> Result<Vec<u8>, IngestError> {
        let photo = decode_rgba(photo)?;
        let options = self.line_art.clone().strength(strength);
        let staged = LineArtPreprocessor::new(options).run_staged(&photo)?;

        tracing::info!(
            input = ?photo.dimensions(),
            output = ?(staged.line_art.width(), staged.line_art.height()),
            strength,
            threshold = staged.threshold,
            inverted = staged.inverted,
            line_pixels = staged.line_art.count(),
            "Preprocessed photo"
        );

        let gray = staged.line_art.to_gray(0, 255);
        Ok(self.finish(encode_gray_png(&gray)?))
    }

    /// [`preprocess`](Self::preprocess) at the configured default strength.
    pub fn preprocess_default(&self, photo: &[u8]) -> Result<Vec<u8>, IngestError> {
        self.preprocess(photo, self.line_art.strength)
    }

    /// Locate the photo's subject and crop it out for separate generation.
    pub fn extract_subject(&self, photo: &[u8]) -> Result<SubjectExtraction, IngestError> {
        let photo = decode_rgba(photo)?;
        let detection = detect_subject(&photo, &self.subject)?;
        let bounds = detection.bounds_for(photo.width(), photo.height());
        let subject_png = self.finish(encode_png(&detection.crop(&photo))?);

        tracing::info!(
            found = detection.found,
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "Extracted subject"
        );

        Ok(SubjectExtraction {
            mask: detection.mask,
            bounds,
            subject_png,
            found: detection.found,
            photo_width: photo.width(),
            photo_height: photo.height(),
        })
    }

    /// Paste subject line art over background line art along a previously
    /// extracted mask.
    pub fn compose_with(
        &self,
        extraction: &SubjectExtraction,
        background: &[u8],
        subject: &[u8],
    ) -> Result<Vec<u8>, IngestError> {
        let background = decode_rgba(background)?;
        let subject = decode_rgba(subject)?;
        let composed = self.compose_decoded(extraction, &background, &subject)?;
        Ok(self.finish(encode_png(&composed)?))
    }

    /// Detect the subject in `photo` and composite `subject` line art over
    /// `background` line art.
    ///
    /// Only an undecodable background is an error. Any other failure logs a
    /// warning and returns the background bytes unchanged.
    pub fn mask_and_composite(
        &self,
        photo: &[u8],
        background: &[u8],
        subject: &[u8],
    ) -> Result<Vec<u8>, IngestError> {
        let background_image = decode_rgba(background)?;

        let composed = self.extract_subject(photo).and_then(|extraction| {
            let subject = decode_rgba(subject)?;
            self.compose_decoded(&extraction, &background_image, &subject)
        });

        match composed {
            Ok(image) => Ok(self.finish(encode_png(&image)?)),
            Err(e) => {
                tracing::warn!(%e, "Subject compositing failed, keeping background");
                Ok(background.to_vec())
            }
        }
    }

    fn compose_decoded(
        &self,
        extraction: &SubjectExtraction,
        background: &RgbaImage,
        subject: &RgbaImage,
    ) -> Result<RgbaImage, IngestError> {
        let (width, height) = background.dimensions();
        let placement = extraction.bounds.scale(
            (extraction.photo_width, extraction.photo_height),
            (width, height),
        );
        Ok(composite_subject(
            background,
            subject,
            &extraction.mask,
            placement,
            self.subject.membership_threshold,
        )?)
    }

    fn finish(&self, png: Vec<u8>) -> Vec<u8> {
        if self.optimize_png {
            optimize_png(png)
        } else {
            png
        }
    }

    pub async fn preprocess_in_background(
        &self,
        photo: Vec<u8>,
        strength: u8,
    ) -> Result<Vec<u8>, IngestError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.preprocess(&photo, strength))
            .await
            .map_err(|e| IngestError::Worker(format!("Preprocess task failed: {e}")))?
    }

    pub async fn preprocess_default_in_background(
        &self,
        photo: Vec<u8>,
    ) -> Result<Vec<u8>, IngestError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.preprocess_default(&photo))
            .await
            .map_err(|e| IngestError::Worker(format!("Preprocess task failed: {e}")))?
    }

    pub async fn extract_subject_in_background(
        &self,
        photo: Vec<u8>,
    ) -> Result<SubjectExtraction, IngestError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.extract_subject(&photo))
            .await
            .map_err(|e| IngestError::Worker(format!("Subject task failed: {e}")))?
    }

    pub async fn mask_and_composite_in_background(
        &self,
        photo: Vec<u8>,
        background: Vec<u8>,
        subject: Vec<u8>,
    ) -> Result<Vec<u8>, IngestError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            service.mask_and_composite(&photo, &background, &subject)
        })
        .await
        .map_err(|e| IngestError::Worker(format!("Composite task failed: {e}")))?
    }
}

impl Default for IngestService {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
