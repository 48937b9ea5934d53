use crate::text::highlight::Language;

/// Slide variant tag without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVariant {
    Cover,
    Intro,
    Content,
    Code,
    Cta,
}

/// Per-variant slide payload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    /// Gradient title slide.
    Cover { title: String, subtitle: String },
    /// "What is it?" slide.
    Intro { title: String, body: String },
    /// Header plus wrapped body paragraph.
    Content { title: String, body: String },
    /// Header plus syntax-colored code window.
    Code {
        title: String,
        code: String,
        language: Language,
    },
    /// Closing call-to-action.
    Cta { body: String },
}

impl CardKind {
    pub fn variant(&self) -> CardVariant {
        match self {
            Self::Cover { .. } => CardVariant::Cover,
            Self::Intro { .. } => CardVariant::Intro,
            Self::Content { .. } => CardVariant::Content,
            Self::Code { .. } => CardVariant::Code,
            Self::Cta { .. } => CardVariant::Cta,
        }
    }
}

/// Position of a card within its finished carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Pagination {
    /// 1-based position.
    pub index: u32,
    /// Final card count.
    pub total: u32,
}

impl Pagination {
    /// `index / total` label, or `None` when either side is zero.
    pub fn label(self) -> Option<String> {
        (self.index > 0 && self.total > 0).then(|| format!("{} / {}", self.index, self.total))
    }
}

/// One slide of a storyboard.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Card {
    #[serde(flatten)]
    pub kind: CardKind,
    /// Unset until the storyboard is paginated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Card {
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            pagination: None,
        }
    }

    pub fn variant(&self) -> CardVariant {
        self.kind.variant()
    }

    pub fn title(&self) -> &str {
        match &self.kind {
            CardKind::Cover { title, .. }
            | CardKind::Intro { title, .. }
            | CardKind::Content { title, .. }
            | CardKind::Code { title, .. } => title,
            CardKind::Cta { .. } => "",
        }
    }

    pub fn body(&self) -> &str {
        match &self.kind {
            CardKind::Intro { body, .. }
            | CardKind::Content { body, .. }
            | CardKind::Cta { body } => body,
            CardKind::Cover { .. } | CardKind::Code { .. } => "",
        }
    }

    pub fn code(&self) -> &str {
        match &self.kind {
            CardKind::Code { code, .. } => code,
            _ => "",
        }
    }

    /// 1-based index, 0 while unpaginated.
    pub fn index(&self) -> u32 {
        self.pagination.map_or(0, |p| p.index)
    }

    /// Final card count, 0 while unpaginated.
    pub fn total_slides(&self) -> u32 {
        self.pagination.map_or(0, |p| p.total)
    }
}

/// Ordered sequence of cards derived from one content record.
///
/// Built in one pass and never mutated; [`Storyboard::paginate`] yields a new, finalized
/// sequence instead of patching cards in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Storyboard {
    cards: Vec<Card>,
}

impl Storyboard {
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn variants(&self) -> Vec<CardVariant> {
        self.cards.iter().map(Card::variant).collect()
    }

    pub fn is_paginated(&self) -> bool {
        self.cards.iter().all(|c| c.pagination.is_some())
    }

    /// Assign contiguous 1-based indices and the final count to every card.
    pub fn paginate(self) -> Self {
        let total = u32::try_from(self.cards.len()).unwrap_or(u32::MAX);
        let cards = self
            .cards
            .into_iter()
            .zip(1u32..)
            .map(|(card, index)| Card {
                pagination: Some(Pagination { index, total }),
                ..card
            })
            .collect();
        Self { cards }
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl<'a> IntoIterator for &'a Storyboard {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/card.rs"]
mod tests;
