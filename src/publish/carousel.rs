use std::path::{Path, PathBuf};

use crate::foundation::error::{CarouselError, CarouselResult, PublishStage};

/// Remote multi-image post API.
///
/// No client ships with this crate; callers plug in their own. Errors are opaque to the
/// pipeline and are reported with the stage they happened in.
pub trait CarouselPublisher {
    /// Upload or register one slide and return its remote item id.
    fn upload_item(&mut self, location: &Path) -> anyhow::Result<String>;

    /// Create the container referencing `item_ids` in carousel order.
    fn create_container(&mut self, item_ids: &[String], caption: &str) -> anyhow::Result<String>;

    /// Publish a container and return the post id.
    fn publish(&mut self, container_id: &str) -> anyhow::Result<String>;
}

/// Remote ids produced by a successful [`publish_carousel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedCarousel {
    pub item_ids: Vec<String>,
    pub container_id: String,
    pub post_id: String,
}

/// Upload every location in order, create one container over all item ids, then publish it.
///
/// The first failing call aborts the sequence.
#[tracing::instrument(skip_all, fields(items = locations.len()))]
pub fn publish_carousel<P: CarouselPublisher + ?Sized>(
    publisher: &mut P,
    locations: &[PathBuf],
    caption: &str,
) -> CarouselResult<PublishedCarousel> {
    if locations.is_empty() {
        return Err(CarouselError::publish(
            PublishStage::Upload,
            "carousel has no slides",
        ));
    }

    let mut item_ids = Vec::with_capacity(locations.len());
    for location in locations {
        let id = publisher.upload_item(location).map_err(|e| {
            CarouselError::publish(
                PublishStage::Upload,
                format!("'{}': {e:#}", location.display()),
            )
        })?;
        tracing::debug!(path = %location.display(), id = %id, "slide uploaded");
        item_ids.push(id);
    }

    let container_id = publisher
        .create_container(&item_ids, caption)
        .map_err(|e| CarouselError::publish(PublishStage::Container, format!("{e:#}")))?;
    let post_id = publisher
        .publish(&container_id)
        .map_err(|e| CarouselError::publish(PublishStage::Publish, format!("{e:#}")))?;

    tracing::info!(post = %post_id, "carousel published");
    Ok(PublishedCarousel {
        item_ids,
        container_id,
        post_id,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/publish/carousel.rs"]
mod tests;
