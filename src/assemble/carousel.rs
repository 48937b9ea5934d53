use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::content::record::ContentRecord;
use crate::foundation::core::Canvas;
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::render::renderer::{CardRenderer, CardWorker};
use crate::story::builder::StoryboardBuilder;
use crate::story::card::Card;

/// What happens to slides already written when a later card fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave them in place.
    #[default]
    KeepWritten,
    /// Best-effort removal of every slide this run wrote.
    RemoveWritten,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Worker threads for parallel mode; `None` lets rayon decide.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssembleOpts {
    pub threading: RenderThreading,
    pub failure_policy: FailurePolicy,
}

/// Builds, paginates, renders and writes one carousel.
///
/// Output order and file names are the same in sequential and parallel mode.
pub struct CarouselAssembler<'a, R> {
    builder: &'a StoryboardBuilder,
    renderer: &'a R,
    opts: AssembleOpts,
}

impl<'a, R: CardRenderer> CarouselAssembler<'a, R> {
    pub fn new(builder: &'a StoryboardBuilder, renderer: &'a R) -> Self {
        Self {
            builder,
            renderer,
            opts: AssembleOpts::default(),
        }
    }

    pub fn with_opts(mut self, opts: AssembleOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn opts(&self) -> &AssembleOpts {
        &self.opts
    }

    /// Write every slide of `record`'s storyboard under `out_dir` and return their paths in
    /// carousel order.
    ///
    /// The first failing card aborts the run; see [`FailurePolicy`] for what happens to the slides
    /// written before it.
    #[tracing::instrument(skip_all, fields(name = %record.name, out_dir = %out_dir.display()))]
    pub fn assemble(
        &self,
        record: &ContentRecord,
        out_dir: &Path,
    ) -> CarouselResult<Vec<PathBuf>> {
        std::fs::create_dir_all(out_dir).map_err(|e| CarouselError::directory(out_dir, e))?;

        let storyboard = self.builder.build(record).paginate();
        let slug = sanitize_filename(&record.name);
        let jobs: Vec<(&Card, PathBuf)> = storyboard
            .cards()
            .iter()
            .map(|card| (card, out_dir.join(slide_file_name(&slug, card.index()))))
            .collect();

        let (written, failure) = if self.opts.threading.parallel {
            self.write_parallel(&jobs)?
        } else {
            self.write_sequential(&jobs)
        };

        match failure {
            None => {
                tracing::info!(slides = written.len(), "carousel written");
                Ok(written)
            }
            Some(err) => {
                self.clean_up(&written);
                Err(err)
            }
        }
    }

    /// Render only the unpaginated cover card to `path`.
    #[tracing::instrument(skip_all, fields(name = %record.name, path = %path.display()))]
    pub fn render_cover(&self, record: &ContentRecord, path: &Path) -> CarouselResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CarouselError::directory(parent, e))?;
        }

        let storyboard = self.builder.build(record);
        let cover = storyboard
            .cards()
            .first()
            .ok_or_else(|| CarouselError::render(0, "storyboard has no cover card"))?;
        let mut worker = self.renderer.worker()?;
        render_and_write(&mut worker, self.renderer.canvas(), cover, path)
    }

    fn write_sequential(
        &self,
        jobs: &[(&Card, PathBuf)],
    ) -> (Vec<PathBuf>, Option<CarouselError>) {
        let mut written = Vec::with_capacity(jobs.len());
        let mut worker = match self.renderer.worker() {
            Ok(worker) => worker,
            Err(err) => {
                let first = jobs.first().map_or(0, |(card, _)| card.index());
                return (written, Some(err.with_card(first)));
            }
        };

        let canvas = self.renderer.canvas();
        for (card, path) in jobs {
            match render_and_write(&mut worker, canvas, card, path) {
                Ok(()) => written.push(path.clone()),
                Err(err) => return (written, Some(err)),
            }
        }
        (written, None)
    }

    fn write_parallel(
        &self,
        jobs: &[(&Card, PathBuf)],
    ) -> CarouselResult<(Vec<PathBuf>, Option<CarouselError>)> {
        let pool = build_thread_pool(self.opts.threading.threads)?;
        let abort = AtomicBool::new(false);
        let canvas = self.renderer.canvas();

        let results: Vec<CarouselResult<Option<PathBuf>>> = pool.install(|| {
            jobs.par_iter()
                .map_init(
                    || self.renderer.worker(),
                    |worker, (card, path)| -> CarouselResult<Option<PathBuf>> {
                        if abort.load(Ordering::Relaxed) {
                            return Ok(None);
                        }
                        let outcome = worker
                            .as_mut()
                            .map_err(|e| CarouselError::render(card.index(), e.to_string()))
                            .and_then(|worker| render_and_write(worker, canvas, card, path));
                        match outcome {
                            Ok(()) => Ok(Some(path.clone())),
                            Err(err) => {
                                abort.store(true, Ordering::Relaxed);
                                Err(err)
                            }
                        }
                    },
                )
                .collect()
        });

        let mut written = Vec::with_capacity(results.len());
        let mut failure = None;
        for result in results {
            match result {
                Ok(Some(path)) => written.push(path),
                Ok(None) => {}
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        Ok((written, failure))
    }

    fn clean_up(&self, written: &[PathBuf]) {
        match self.opts.failure_policy {
            FailurePolicy::KeepWritten => {
                if !written.is_empty() {
                    tracing::warn!(
                        slides = written.len(),
                        "keeping slides written before failure"
                    );
                }
            }
            FailurePolicy::RemoveWritten => {
                for path in written {
                    if let Err(e) = std::fs::remove_file(path) {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to remove slide"
                        );
                    }
                }
            }
        }
    }
}

fn render_and_write<W: CardWorker>(
    worker: &mut W,
    canvas: Canvas,
    card: &Card,
    path: &Path,
) -> CarouselResult<()> {
    let frame = worker
        .render_card(card)
        .map_err(|e| e.with_card(card.index()))?;
    if (frame.width, frame.height) != (canvas.width, canvas.height) {
        return Err(CarouselError::render(
            card.index(),
            format!(
                "frame is {}x{}, canvas is {}x{}",
                frame.width, frame.height, canvas.width, canvas.height
            ),
        ));
    }
    frame.save_png(path)?;
    tracing::debug!(card = card.index(), path = %path.display(), "slide written");
    Ok(())
}

/// Replace every char outside `[A-Za-z0-9]` with `_`, one for one.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<slug>_slide_<index>.png`
pub fn slide_file_name(slug: &str, index: u32) -> String {
    format!("{slug}_slide_{index}.png")
}

fn build_thread_pool(threads: Option<usize>) -> CarouselResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CarouselError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CarouselError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/carousel.rs"]
mod tests;
