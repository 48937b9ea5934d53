//! cardcast turns a library record into a carousel of rendered slide images.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `ContentRecord -> Storyboard` (fixed card order, optional cards suppressed when
//!    their fields are absent)
//! 2. **Paginate**: every card gets its 1-based index and the final card count
//! 3. **Render**: `Card -> FrameRGBA` on the CPU (`vello_cpu`), with text shaped by `parley`
//! 4. **Write**: one PNG per card, named `<slug>_slide_<index>.png`, returned in order
//!
//! Publishing the written slides is left to a caller-supplied [`CarouselPublisher`].
//!
//! ```no_run
//! use cardcast::{CarouselAssembler, CarouselConfig, ContentRecord};
//!
//! # fn main() -> cardcast::CarouselResult<()> {
//! let config = CarouselConfig::default();
//! let engine = config.engine()?;
//! let builder = config.storyboard_builder();
//! let record = ContentRecord::from_json_file("record.json".as_ref())?;
//! let slides = CarouselAssembler::new(&builder, &engine)
//!     .with_opts(config.render.clone())
//!     .assemble(&record, &config.output_dir)?;
//! # let _ = slides;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

/// Carousel assembly and slide output.
pub mod assemble;
/// Run configuration.
pub mod config;
/// Input records.
pub mod content;
/// Errors, colors and canvas geometry shared by every stage.
pub mod foundation;
/// Tracing subscriber setup.
pub mod logging;
/// Remote publish hand-off.
pub mod publish;
/// Card rasterization.
pub mod render;
/// Cards and storyboards.
pub mod story;
/// Theme and branding constants.
pub mod style;
/// Fonts, shaping, wrapping and highlighting.
pub mod text;

pub use assemble::carousel::{
    AssembleOpts, CarouselAssembler, FailurePolicy, RenderThreading, sanitize_filename,
    slide_file_name,
};
pub use config::CarouselConfig;
pub use content::record::ContentRecord;
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{CarouselError, CarouselResult, PublishStage};
pub use logging::{LoggingConfig, init_logging};
pub use publish::carousel::{CarouselPublisher, PublishedCarousel, publish_carousel};
pub use render::engine::{Engine, RenderSession};
pub use render::frame::FrameRGBA;
pub use render::renderer::{CardRenderer, CardWorker};
pub use story::builder::{StoryboardBuilder, build_storyboard};
pub use story::card::{Card, CardKind, CardVariant, Pagination, Storyboard};
pub use story::install::{InstallStrategy, ModuleFetchStrategy};
pub use style::theme::{Branding, Palette, Theme, Typography};
pub use text::fonts::{Face, FontConfig, FontSet, FontSource};
pub use text::highlight::{ColorRole, Language, Token, highlight, highlight_line};
pub use text::wrap::{FixedAdvance, TextMeasure, wrap_text};
