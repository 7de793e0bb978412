//! Illustration scenes: prompts for the passage, one generated image each, one scene per
//! image cloned from the image template.
//!
//! Every failure here is reported as a warning; the verse scenes stand on their own.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::app::commands::replicate::{ReplicationReport, SceneReplicator, SceneTarget};
use crate::domain::image::{display_path, image_file_name, output_dir_name};
use crate::domain::{
    AppError, BookCatalog, GeneratedImage, ImageConfig, ImageSceneRequest, Passage,
    ScriptureReference,
};
use crate::ports::{ImageGenerator, SceneClient};

#[derive(Debug, Default)]
pub struct Illustrations {
    /// `None` when no image made it to disk.
    pub report: Option<ReplicationReport>,
    /// Every image saved this run, in prompt order.
    pub images: Vec<GeneratedImage>,
    pub warnings: Vec<String>,
}

impl Illustrations {
    fn skip(mut self, what: &str, err: AppError) -> Self {
        warn!("{what}: {err}");
        self.warnings.push(format!("{what}: {err}"));
        self
    }
}

pub fn illustrate<G, C>(
    generator: &G,
    client: &mut C,
    config: &ImageConfig,
    reference: &ScriptureReference,
    passage: &Passage,
) -> Illustrations
where
    G: ImageGenerator + ?Sized,
    C: SceneClient + ?Sized,
{
    let mut outcome = Illustrations::default();
    let Some(book_id) = BookCatalog::book_id(&reference.book) else {
        return outcome.skip("illustrations skipped", AppError::UnknownBook(reference.book.clone()));
    };

    let prompts = match generator.scene_prompts(&passage.plain_text()) {
        Ok(prompts) => prompts,
        Err(err) => return outcome.skip("illustrations skipped", err),
    };
    if prompts.is_empty() {
        info!("no illustration prompts suggested");
        return outcome;
    }

    let dir = config.output_dir.join(output_dir_name(reference));
    if let Err(err) = fs::create_dir_all(&dir) {
        return outcome.skip(&format!("output directory {} not created", dir.display()), err.into());
    }

    let total = prompts.len();
    let mut requests = Vec::with_capacity(total);
    for (index, prompt) in prompts.into_iter().enumerate() {
        let number = index + 1;
        info!(
            number,
            total,
            verses = %prompt.verse_range,
            description = %prompt.description,
            "generating illustration"
        );
        match save_image(generator, &dir, number, &prompt.image_prompt) {
            Ok(path) => requests.push(ImageSceneRequest {
                scene_name: ImageSceneRequest::scene_name_for(book_id, reference, number),
                file_path: display_path(&path),
                prompt,
            }),
            Err(err) => {
                outcome = outcome.skip(&format!("illustration '{}' skipped", prompt.description), err);
            }
        }
    }
    if requests.is_empty() {
        return outcome;
    }
    outcome.images = requests.iter().map(ImageSceneRequest::record).collect();

    match SceneReplicator::for_template(client, &config.template_scene, &config.image_source_name)
    {
        Ok(mut replicator) => {
            outcome.report = Some(replicator.replicate_all(requests.iter().map(SceneTarget::from)));
            outcome
        }
        Err(err) => outcome.skip("illustration scenes not created", err),
    }
}

/// Generate one image and write it as `img_<number>.png` under `dir`; returns the absolute path.
fn save_image<G: ImageGenerator + ?Sized>(
    generator: &G,
    dir: &Path,
    number: usize,
    prompt: &str,
) -> Result<PathBuf, AppError> {
    let bytes = generator.generate_image(prompt)?;
    let path = dir.join(image_file_name(number));
    fs::write(&path, bytes)?;
    info!(path = %path.display(), "saved illustration");
    Ok(std::path::absolute(&path)?)
}
