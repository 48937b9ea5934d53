use crate::{
    content::record::ContentRecord,
    story::card::{Card, CardKind, Storyboard},
    story::install::{InstallStrategy, ModuleFetchStrategy},
    style::theme::Branding,
};

/// Turns a [`ContentRecord`] into an ordered [`Storyboard`].
///
/// Card order is fixed: Cover, Intro, optional Details, optional Installation, optional
/// Community, CTA. Building never fails; absent optional fields only suppress optional cards.
#[derive(Debug)]
pub struct StoryboardBuilder {
    branding: Branding,
    strategies: Vec<Box<dyn InstallStrategy>>,
}

impl Default for StoryboardBuilder {
    fn default() -> Self {
        Self::new(Branding::default())
    }
}

impl StoryboardBuilder {
    /// Builder with the default module-fetch install strategy.
    pub fn new(branding: Branding) -> Self {
        Self {
            branding,
            strategies: vec![Box::new(ModuleFetchStrategy::default())],
        }
    }

    /// Replace all install strategies. An empty list disables the installation card.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn InstallStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Append a strategy consulted after the existing ones.
    pub fn with_strategy(mut self, strategy: impl InstallStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    #[tracing::instrument(skip_all, fields(name = %record.name))]
    pub fn build(&self, record: &ContentRecord) -> Storyboard {
        let mut cards = Vec::with_capacity(6);

        cards.push(Card::new(CardKind::Cover {
            title: record.name.clone(),
            subtitle: self.cover_subtitle(&record.category),
        }));

        cards.push(Card::new(CardKind::Intro {
            title: "What is it?".to_string(),
            body: record.description.clone(),
        }));

        if let Some(body) = details_body(record) {
            cards.push(Card::new(CardKind::Content {
                title: "Details".to_string(),
                body,
            }));
        }

        if let Some(card) = self.installation_card(&record.url) {
            cards.push(card);
        }

        if let Some(body) = community_body(record) {
            cards.push(Card::new(CardKind::Content {
                title: "Community".to_string(),
                body,
            }));
        }

        cards.push(Card::new(CardKind::Cta {
            body: format!("Start using {} today!", record.name),
        }));

        tracing::debug!(cards = cards.len(), "storyboard built");
        Storyboard::from_cards(cards)
    }

    fn cover_subtitle(&self, category: &str) -> String {
        let category = category.trim();
        if category.is_empty() {
            return self.branding.generic_subtitle.clone();
        }
        format!("{} Library", title_case(category))
    }

    fn installation_card(&self, url: &str) -> Option<Card> {
        self.strategies.iter().find_map(|s| {
            s.install_command(url).map(|code| {
                Card::new(CardKind::Code {
                    title: "Installation".to_string(),
                    code,
                    language: s.language(),
                })
            })
        })
    }
}

/// Build a storyboard with default branding and install strategy.
pub fn build_storyboard(record: &ContentRecord) -> Storyboard {
    StoryboardBuilder::default().build(record)
}

fn details_body(record: &ContentRecord) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if !record.category.is_empty() {
        parts.push(format!("Category: {}", record.category));
    }
    if !record.tags.is_empty() {
        let tags = record
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Tags: {tags}"));
    }
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

fn community_body(record: &ContentRecord) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if record.star_count() > 0 {
        parts.push(format!("{} stars", record.star_count()));
    }
    if let Some(author) = record.author_name() {
        parts.push(format!("By: {author}"));
    }
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// Upper-case the first letter of every word; other characters are left untouched.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_' || c == '\'');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/story/builder.rs"]
mod tests;
