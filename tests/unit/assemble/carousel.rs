use std::sync::Mutex;

use super::*;
use crate::foundation::core::Canvas;
use crate::render::frame::FrameRGBA;

/// Renders solid 4x4 frames and records every pagination it sees.
#[derive(Default)]
struct MockRenderer {
    fail_on: Option<u32>,
    /// Card whose frame comes back one pixel too wide.
    misfit_on: Option<u32>,
    broken_worker: bool,
    seen: Mutex<Vec<(u32, u32)>>,
}

struct MockWorker<'a> {
    renderer: &'a MockRenderer,
}

impl CardRenderer for MockRenderer {
    type Worker<'a>
        = MockWorker<'a>
    where
        Self: 'a;

    fn worker(&self) -> CarouselResult<Self::Worker<'_>> {
        if self.broken_worker {
            return Err(CarouselError::render(0, "no fonts registered"));
        }
        Ok(MockWorker { renderer: self })
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: 4,
            height: 4,
        }
    }
}

impl CardWorker for MockWorker<'_> {
    fn render_card(&mut self, card: &Card) -> CarouselResult<FrameRGBA> {
        self.renderer
            .seen
            .lock()
            .unwrap()
            .push((card.index(), card.total_slides()));
        if self.renderer.fail_on == Some(card.index()) {
            return Err(CarouselError::render(0, "boom"));
        }
        let shade = (card.index() * 40) as u8;
        let width = if self.renderer.misfit_on == Some(card.index()) {
            5
        } else {
            4
        };
        Ok(FrameRGBA {
            width,
            height: 4,
            data: [shade, shade, shade, 255].repeat(width as usize * 4),
            premultiplied: true,
        })
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("cardcast-{tag}-{}-{nanos}", std::process::id()))
}

fn full_record() -> ContentRecord {
    let mut record = ContentRecord::new("go-fizz/v2");
    record.description = "a lib".into();
    record.url = "https://github.com/x/fizz".into();
    record.category = "cli".into();
    record.tags = ["tools".to_string()].into();
    record.stars = Some(42);
    record.author = Some("jdoe".into());
    record
}

fn parallel(threads: Option<usize>) -> AssembleOpts {
    AssembleOpts {
        threading: RenderThreading {
            parallel: true,
            threads,
        },
        ..AssembleOpts::default()
    }
}

#[test]
fn sanitizer_preserves_length_and_charset() {
    for name in ["fizz", "go-fizz/v2", "héllo wörld!!", "", "a..b", "日本"] {
        let out = sanitize_filename(name);
        assert_eq!(out.chars().count(), name.chars().count(), "{name}");
        assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
    assert_eq!(sanitize_filename("a..b"), "a__b");
    assert_eq!(slide_file_name("fizz", 3), "fizz_slide_3.png");
}

#[test]
fn sequential_assembly_writes_every_slide_in_order() {
    let dir = temp_dir("seq");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();
    let paths = CarouselAssembler::new(&builder, &renderer)
        .assemble(&full_record(), &dir)
        .unwrap();

    assert_eq!(paths.len(), 6);
    for (i, path) in paths.iter().enumerate() {
        assert_eq!(path, &dir.join(format!("go_fizz_v2_slide_{}.png", i + 1)));
        let img = image::open(path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0[0], ((i as u32 + 1) * 40) as u8);
    }
    let seen = renderer.seen.lock().unwrap().clone();
    assert_eq!(seen, (1..=6).map(|i| (i, 6)).collect::<Vec<_>>());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn parallel_assembly_matches_sequential_paths() {
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();

    let seq_dir = temp_dir("par-a");
    let par_dir = temp_dir("par-b");
    let seq = CarouselAssembler::new(&builder, &renderer)
        .assemble(&full_record(), &seq_dir)
        .unwrap();
    let par = CarouselAssembler::new(&builder, &renderer)
        .with_opts(parallel(Some(3)))
        .assemble(&full_record(), &par_dir)
        .unwrap();

    let names = |paths: &[PathBuf]| -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    };
    assert_eq!(names(&seq), names(&par));
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }
    let _ = std::fs::remove_dir_all(&seq_dir);
    let _ = std::fs::remove_dir_all(&par_dir);
}

#[test]
fn render_failure_keeps_earlier_slides_by_default() {
    let dir = temp_dir("keep");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer {
        fail_on: Some(3),
        ..MockRenderer::default()
    };
    let err = CarouselAssembler::new(&builder, &renderer)
        .assemble(&full_record(), &dir)
        .unwrap_err();

    assert!(matches!(err, CarouselError::Render { card: 3, .. }), "{err}");
    assert!(dir.join("go_fizz_v2_slide_1.png").exists());
    assert!(dir.join("go_fizz_v2_slide_2.png").exists());
    assert!(!dir.join("go_fizz_v2_slide_3.png").exists());
    assert!(!dir.join("go_fizz_v2_slide_4.png").exists());
    assert_eq!(renderer.seen.lock().unwrap().len(), 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn render_failure_can_remove_written_slides() {
    let dir = temp_dir("remove");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer {
        fail_on: Some(3),
        ..MockRenderer::default()
    };
    let err = CarouselAssembler::new(&builder, &renderer)
        .with_opts(AssembleOpts {
            failure_policy: FailurePolicy::RemoveWritten,
            ..AssembleOpts::default()
        })
        .assemble(&full_record(), &dir)
        .unwrap_err();

    assert!(matches!(err, CarouselError::Render { card: 3, .. }));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn parallel_failure_reports_the_failing_card() {
    let dir = temp_dir("par-fail");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer {
        fail_on: Some(5),
        ..MockRenderer::default()
    };
    let err = CarouselAssembler::new(&builder, &renderer)
        .with_opts(AssembleOpts {
            failure_policy: FailurePolicy::RemoveWritten,
            ..parallel(Some(2))
        })
        .assemble(&full_record(), &dir)
        .unwrap_err();

    assert!(matches!(err, CarouselError::Render { card: 5, .. }), "{err}");
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn worker_creation_failure_is_a_render_failure() {
    let dir = temp_dir("worker");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer {
        broken_worker: true,
        ..MockRenderer::default()
    };
    for opts in [AssembleOpts::default(), parallel(None)] {
        let err = CarouselAssembler::new(&builder, &renderer)
            .with_opts(opts)
            .assemble(&full_record(), &dir)
            .unwrap_err();
        assert!(matches!(err, CarouselError::Render { card: 1.., .. }), "{err}");
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn uncreatable_output_directory_is_a_directory_failure() {
    let blocker = temp_dir("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();

    let err = CarouselAssembler::new(&builder, &renderer)
        .assemble(&full_record(), &blocker.join("out"))
        .unwrap_err();
    match err {
        CarouselError::Directory { path, .. } => assert_eq!(path, blocker.join("out")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(renderer.seen.lock().unwrap().is_empty());
    let _ = std::fs::remove_file(&blocker);
}

#[test]
fn unwritable_slide_is_a_write_failure() {
    let dir = temp_dir("write");
    std::fs::create_dir_all(dir.join("go_fizz_v2_slide_2.png")).unwrap();
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();

    let err = CarouselAssembler::new(&builder, &renderer)
        .assemble(&full_record(), &dir)
        .unwrap_err();
    match err {
        CarouselError::Write { path, .. } => {
            assert_eq!(path, dir.join("go_fizz_v2_slide_2.png"))
        }
        other => panic!("unexpected error: {other}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_threads_is_rejected() {
    let dir = temp_dir("threads");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();
    let err = CarouselAssembler::new(&builder, &renderer)
        .with_opts(parallel(Some(0)))
        .assemble(&full_record(), &dir)
        .unwrap_err();
    assert!(matches!(err, CarouselError::Config(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cover_only_mode_renders_the_unpaginated_cover() {
    let dir = temp_dir("cover");
    let path = dir.join("nested").join("cover.png");
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer::default();

    CarouselAssembler::new(&builder, &renderer)
        .render_cover(&full_record(), &path)
        .unwrap();
    assert!(path.exists());
    assert_eq!(renderer.seen.lock().unwrap().as_slice(), &[(0, 0)]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn frame_off_the_renderer_canvas_is_a_render_failure() {
    let builder = StoryboardBuilder::default();
    let renderer = MockRenderer {
        misfit_on: Some(2),
        ..MockRenderer::default()
    };
    for (tag, opts) in [
        ("misfit-seq", AssembleOpts::default()),
        ("misfit-par", parallel(Some(2))),
    ] {
        let dir = temp_dir(tag);
        let err = CarouselAssembler::new(&builder, &renderer)
            .with_opts(opts)
            .assemble(&full_record(), &dir)
            .unwrap_err();
        match err {
            CarouselError::Render { card, reason } => {
                assert_eq!(card, 2);
                assert!(reason.contains("5x4"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.join("go_fizz_v2_slide_2.png").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
