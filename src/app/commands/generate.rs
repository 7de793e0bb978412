//! End-to-end run: reference → verses → verse scenes, then optional illustration scenes.

use chrono::Utc;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::app::commands::fetch::fetch_passage;
use crate::app::commands::illustrate::{Illustrations, illustrate};
use crate::app::commands::plan::record_processed;
use crate::app::commands::replicate::{ReplicationReport, SceneReplicator, SceneTarget};
use crate::app::scene_session::{RetryPolicy, SceneSession};
use crate::domain::scene::text_settings;
use crate::domain::{AppConfig, AppError, GeneratedImage, Passage, ScriptureReference};
use crate::ports::{ImageGenerator, PlanStore, SceneClient, SceneClientFactory, ScriptureSource};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub reference: String,
    /// Fetch and render without connecting to the scene system.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct GenerateOutcome {
    pub reference: ScriptureReference,
    pub passage: Passage,
    /// `None` when nothing was sent to the scene system (dry run or no verses).
    pub report: Option<ReplicationReport>,
    /// Scene made the program scene after replication.
    pub activated_scene: Option<String>,
    /// Illustration scenes; `None` when illustrations are off or none were saved.
    pub image_report: Option<ReplicationReport>,
    /// Illustrations saved this run.
    pub images: Vec<GeneratedImage>,
    pub plan_updated: bool,
    pub warnings: Vec<String>,
}

/// Result of the work done over one open session.
struct Publication {
    report: ReplicationReport,
    activated_scene: Option<String>,
    illustrations: Option<Illustrations>,
    warnings: Vec<String>,
}

pub fn execute<S, F, P, G>(
    ctx: &AppContext<S, F, P, G>,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    S: ScriptureSource,
    F: SceneClientFactory,
    P: PlanStore,
    G: ImageGenerator,
{
    let config = ctx.config();
    let reference = ScriptureReference::parse(&options.reference)?;
    let passage = fetch_passage(&reference, ctx.scripture(), &config.bible)?;

    let mut outcome = GenerateOutcome {
        reference,
        passage,
        report: None,
        activated_scene: None,
        image_report: None,
        images: vec![],
        plan_updated: false,
        warnings: vec![],
    };
    if outcome.passage.is_empty() || options.dry_run {
        return Ok(outcome);
    }

    let mut session = SceneSession::open(ctx.scenes(), RetryPolicy::from_config(&config.obs))?;
    let generator = ctx.images().filter(|_| config.images.enabled);
    let Publication { report, activated_scene, illustrations, mut warnings } =
        publish(session.client(), config, generator, &outcome.reference, &outcome.passage)?;
    outcome.activated_scene = activated_scene;
    if let Some(illustrations) = illustrations {
        warnings.extend(illustrations.warnings);
        outcome.image_report = illustrations.report;
        outcome.images = illustrations.images;
    }
    outcome.warnings = warnings;

    if let Err(err) = session.close() {
        warn!("Failed to disconnect from scene system: {err}");
        outcome.warnings.push(format!("disconnect failed: {err}"));
    }

    if report.is_complete() {
        match record_processed(
            ctx.plans(),
            &outcome.reference,
            outcome.passage.title.as_deref(),
            &outcome.images,
            Utc::now(),
        ) {
            Ok(updated) => outcome.plan_updated = updated,
            Err(err) => {
                warn!("Failed to update study plan: {err}");
                outcome.warnings.push(format!("study plan not updated: {err}"));
            }
        }
    }

    outcome.report = Some(report);
    Ok(outcome)
}

/// Everything done over one open session.
fn publish<G: ImageGenerator + ?Sized>(
    client: &mut dyn SceneClient,
    config: &AppConfig,
    generator: Option<&G>,
    reference: &ScriptureReference,
    passage: &Passage,
) -> Result<Publication, AppError> {
    let mut warnings = Vec::new();
    if let Some(collection) = &config.template.scene_collection {
        ensure_scene_collection(&mut *client, collection)?;
    }

    let report = SceneReplicator::prepare(&mut *client, &config.template)?
        .replicate_all(passage.verses.iter().map(SceneTarget::from));
    info!(
        created = report.created.len(),
        updated = report.updated.len(),
        failed = report.failures.len(),
        "replicated verse scenes"
    );

    let base_layer = [
        (&config.template.title_source, passage.title.clone()),
        (&config.template.reference_source, Some(reference.to_string())),
    ];
    for (source, text) in base_layer {
        let (Some(source), Some(text)) = (source, text) else {
            continue;
        };
        if let Err(err) = client.set_input_settings(source, &text_settings(&text), true) {
            warn!("Failed to set base-layer source {source}: {err}");
            warnings.push(format!("base-layer source {source} not updated: {err}"));
        }
    }

    let mut activated_scene = None;
    if config.template.activate_first_scene
        && let Some(scene) = first_ready_scene(passage, &report)
    {
        match client.set_current_program_scene(scene) {
            Ok(()) => {
                info!(scene, "activated first verse scene");
                activated_scene = Some(scene.to_string());
            }
            Err(err) => {
                warn!("Failed to activate scene {scene}: {err}");
                warnings.push(format!("scene {scene} not activated: {err}"));
            }
        }
    }

    let illustrations = generator.map(|generator| {
        illustrate(generator, &mut *client, &config.images, reference, passage)
    });

    Ok(Publication { report, activated_scene, illustrations, warnings })
}

/// Switch to `name` unless it is already the active collection.
pub fn ensure_scene_collection(
    client: &mut (impl SceneClient + ?Sized),
    name: &str,
) -> Result<(), AppError> {
    if client.get_current_scene_collection()? == name {
        return Ok(());
    }
    if !client.get_scene_collection_list()?.iter().any(|collection| collection == name) {
        return Err(AppError::SceneCollectionNotFound(name.to_string()));
    }
    client.set_current_scene_collection(name)?;
    info!(collection = name, "switched scene collection");
    Ok(())
}

/// First verse (in passage order) whose scene was created or updated.
fn first_ready_scene<'a>(passage: &'a Passage, report: &ReplicationReport) -> Option<&'a str> {
    passage
        .verses
        .iter()
        .map(|verse| verse.scene_name.as_str())
        .find(|name| report.succeeded(name))
}
