//! The trigger surface: one entry point per audit action. Each call is a
//! complete, stateless run and returns the number of findings it emitted.
//! Nothing is cached between calls.

use std::io;
use std::path::Path;

use crate::project::{AssetIndex, Project, resolve_res_path};
use crate::report::DiagnosticSink;
use crate::resolve::LiveSet;
use crate::scan::scan;
use crate::scene::SceneDoc;
use crate::uid32::NodeID;

/// Context label for asset scans, which have no owning scene.
pub const PROJECT_CONTEXT: &str = "Project";

/// Scan one scene document for missing references: the manifest's main scene,
/// or an explicit `res://` path. Returns the number of findings emitted.
pub fn scan_scene(
    root: &Path,
    scene_path: Option<&str>,
    sink: &mut dyn DiagnosticSink,
) -> io::Result<usize> {
    let project = Project::load(root)?;
    let assets = AssetIndex::build(root)?;

    let scene_res = match scene_path {
        Some(path) => path.to_string(),
        None => project.main_scene().to_string(),
    };

    scan_one_scene(root, &assets, &scene_res, sink)
}

/// Scan every *enabled* scene in the manifest's `[[scenes]]` list, in listed
/// order, loading one scene at a time. Returns the total finding count.
pub fn scan_all_scenes(root: &Path, sink: &mut dyn DiagnosticSink) -> io::Result<usize> {
    let project = Project::load(root)?;
    let assets = AssetIndex::build(root)?;

    let mut total = 0;
    for scene_res in project.enabled_scenes() {
        total += scan_one_scene(root, &assets, scene_res, sink)?;
    }
    Ok(total)
}

/// Scan every scene-shaped document under `res/`, whether or not the manifest
/// lists it. A document that fails to load is skipped with a warning, the way
/// an asset browser skips assets it cannot open. Returns the total count.
pub fn scan_assets(root: &Path, sink: &mut dyn DiagnosticSink) -> io::Result<usize> {
    let _ = Project::load(root)?;
    let assets = AssetIndex::build(root)?;

    let mut total = 0;
    for scene_res in assets.scene_documents() {
        let file = resolve_res_path(root, &scene_res);
        let doc = match SceneDoc::load(&file) {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!(target: "sabueso", "skipping unreadable document {scene_res}: {err}");
                continue;
            }
        };
        total += scan_doc(&doc, &assets, PROJECT_CONTEXT, sink);
    }
    Ok(total)
}

fn scan_one_scene(
    root: &Path,
    assets: &AssetIndex,
    scene_res: &str,
    sink: &mut dyn DiagnosticSink,
) -> io::Result<usize> {
    let file = resolve_res_path(root, scene_res);
    let doc = SceneDoc::load(&file).map_err(io::Error::from)?;
    Ok(scan_doc(&doc, assets, scene_res, sink))
}

fn scan_doc(
    doc: &SceneDoc,
    assets: &AssetIndex,
    context: &str,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let live = LiveSet::for_scene(doc, assets);
    let roots: Vec<NodeID> = doc.objects().map(|o| o.id).collect();

    let mut count = 0;
    for finding in scan(doc, &live, context, roots) {
        sink.emit(&finding);
        count += 1;
    }
    count
}
