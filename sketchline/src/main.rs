#![warn(clippy::pedantic)]

pub mod settings;
pub mod stats;

use anyhow::Result as AnyResult;
use sketchline_core::{
    tess::{StripTessellator, StrokeTessellator},
    CanvasState, Color, Point2, StrokeSample,
};

/// Open, tessellate, and report on one document.
fn report_path(
    path: &std::path::Path,
    settings: &settings::Settings,
    tessellator: &StripTessellator,
) -> AnyResult<()> {
    let file = std::fs::File::open(path)?;
    let mut canvas = CanvasState::with_history_capacity(settings.history_capacity);
    canvas.load_from(std::io::BufReader::new(file))?;

    let mut stats = stats::StatsSink::default();
    canvas.render(tessellator, &mut stats);
    log::info!("{path:?}: {} strokes, {stats}", canvas.stroke_count());
    Ok(())
}

/// Scripted session on a fresh canvas, for when no documents are given.
fn demo_session(settings: &settings::Settings, tessellator: &StripTessellator) -> AnyResult<()> {
    let mut canvas = CanvasState::with_history_capacity(settings.history_capacity);

    // A pressure-tapered wave, a dot, and a straight line.
    canvas.begin_stroke(Color::new(0.1, 0.2, 0.8), 6.0);
    for idx in 0..=32u8 {
        let t = f32::from(idx) / 32.0;
        let position = Point2::new(t * 200.0, (t * std::f32::consts::TAU).sin() * 40.0);
        canvas.add_point(
            StrokeSample::new(position)
                .with_pressure(1.0 - t * 0.75)
                .with_timestamp(t),
        );
    }
    canvas.end_stroke();

    canvas.begin_stroke(Color::new(0.9, 0.1, 0.1), 12.0);
    canvas.add_point(StrokeSample::new(Point2::new(250.0, 0.0)));
    canvas.end_stroke();

    canvas.begin_stroke(Color::BLACK, 2.0);
    canvas.add_point(StrokeSample::new(Point2::new(0.0, 100.0)));
    canvas.add_point(StrokeSample::new(Point2::new(300.0, 100.0)));
    canvas.end_stroke();

    let mut stats = stats::StatsSink::default();
    canvas.render(tessellator, &mut stats);
    log::info!("Drew {} strokes: {stats}", canvas.stroke_count());
    log::info!("Expected {} vertices", tessellator.num_vertices_of_slice(canvas.strokes()));

    // Lasso the dot and drag it down.
    let selected = canvas.select_in_polygon(&[
        Point2::new(230.0, -20.0),
        Point2::new(270.0, -20.0),
        Point2::new(270.0, 20.0),
        Point2::new(230.0, 20.0),
    ]);
    log::info!("Lasso picked {selected} strokes");
    canvas.move_selected(Point2::new(0.0, 50.0));
    canvas.clear_selection();

    canvas.undo();
    log::info!("Undo: {} strokes", canvas.stroke_count());
    canvas.redo();
    log::info!("Redo: {} strokes", canvas.stroke_count());

    let mut bytes = Vec::new();
    canvas.save_into(&mut bytes)?;
    log::info!("Saved {}", human_bytes::human_bytes(bytes.len() as f64));

    let mut reloaded = CanvasState::with_history_capacity(settings.history_capacity);
    reloaded.load_from(bytes.as_slice())?;
    anyhow::ensure!(
        reloaded.strokes() == canvas.strokes(),
        "reloaded strokes differ from saved ones"
    );
    log::info!("Reloaded {} strokes intact", reloaded.stroke_count());
    Ok(())
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let settings = settings::Settings::load();
    if settings.did_fail_to_load() {
        if let Err(e) = settings.save() {
            log::warn!("Failed to save default settings:\n{e:?}");
        }
    }
    let tessellator = settings.tessellator();

    // Args are a simple list of paths to open.
    let paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
    if paths.is_empty() {
        return demo_session(&settings, &tessellator);
    }

    let loading_succeeded = {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
        // Did we have at least one success?
        let had_success = std::sync::atomic::AtomicBool::new(false);
        paths.into_par_iter().for_each(|path| {
            match report_path(&path, &settings, &tessellator) {
                Err(e) => {
                    log::error!("failed to open file {path:?}: {e:#}");
                }
                Ok(()) => {
                    had_success.store(true, std::sync::atomic::Ordering::Relaxed);
                }
            }
        });

        had_success.into_inner()
    };
    if !loading_succeeded {
        anyhow::bail!("Failed to load any provided document.");
    }
    Ok(())
}
