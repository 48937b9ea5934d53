use crate::foundation::core::Canvas;
use crate::foundation::error::CarouselResult;
use crate::render::frame::FrameRGBA;
use crate::story::card::Card;

/// Shared, read-only source of per-thread card workers.
///
/// The assembler asks for one worker per rendering thread and reuses it for every card that
/// thread draws. Implementations must be safe to share across threads once constructed.
pub trait CardRenderer: Sync {
    /// Mutable per-thread drawing state.
    type Worker<'a>: CardWorker
    where
        Self: 'a;

    /// Create a fresh worker. Failure here is reported as a render failure of the card that
    /// needed it.
    fn worker(&self) -> CarouselResult<Self::Worker<'_>>;

    /// Dimensions of every frame this renderer produces.
    fn canvas(&self) -> Canvas;
}

/// Renders one card at a time into a frame.
pub trait CardWorker {
    fn render_card(&mut self, card: &Card) -> CarouselResult<FrameRGBA>;
}
