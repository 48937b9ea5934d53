//! The three typefaces every card is drawn with, and where they come from.

use std::path::PathBuf;
use std::sync::Arc;

use sha2::Digest as _;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Typeface role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Mono,
}

impl Face {
    pub const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Mono];

    pub fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Bold => "bold",
            Self::Mono => "mono",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, Self::Bold)
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one face's bytes are read from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FontSource {
    /// First installed family from the list; a generic sans-serif or monospace family is tried
    /// last.
    System { families: Vec<String> },
    /// A TrueType/OpenType file. Face index 0 is used.
    File { path: PathBuf },
}

impl FontSource {
    pub fn system(families: &[&str]) -> Self {
        Self::System {
            families: families.iter().map(|f| f.to_string()).collect(),
        }
    }
}

const SANS_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

const MONO_FAMILIES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "Courier New",
    "Menlo",
];

/// Per-face font sources.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: FontSource,
    pub bold: FontSource,
    pub mono: FontSource,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: FontSource::system(SANS_FAMILIES),
            bold: FontSource::system(SANS_FAMILIES),
            mono: FontSource::system(MONO_FAMILIES),
        }
    }
}

impl FontConfig {
    /// Read every face from a font file.
    pub fn from_files(
        regular: impl Into<PathBuf>,
        bold: impl Into<PathBuf>,
        mono: impl Into<PathBuf>,
    ) -> Self {
        Self {
            regular: FontSource::File {
                path: regular.into(),
            },
            bold: FontSource::File { path: bold.into() },
            mono: FontSource::File { path: mono.into() },
        }
    }

    pub fn source(&self, face: Face) -> &FontSource {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Mono => &self.mono,
        }
    }
}

/// One parsed face: raw bytes plus the paint-side font handle.
#[derive(Clone)]
pub struct LoadedFace {
    pub face: Face,
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a font collection file.
    pub index: u32,
    /// Family name reported by the font itself.
    pub family: String,
    pub font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LoadedFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFace")
            .field("face", &self.face)
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl LoadedFace {
    fn parse(
        face: Face,
        bytes: Vec<u8>,
        index: u32,
        family_hint: Option<&str>,
    ) -> CarouselResult<Self> {
        let family = probe_family(&bytes, family_hint).ok_or_else(|| {
            CarouselError::font_load(face.name(), "no usable font family in data")
        })?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.clone()),
            index,
        );
        Ok(Self {
            face,
            bytes: Arc::new(bytes),
            index,
            family,
            font,
        })
    }

    /// Lowercase hex SHA-256 of the font bytes.
    pub fn fingerprint(&self) -> String {
        let digest = sha2::Sha256::digest(self.bytes.as_slice());
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}

/// Register `bytes` in a throwaway collection to check they parse, and return the family name.
fn probe_family(bytes: &[u8], family_hint: Option<&str>) -> Option<String> {
    let mut collection = parley::fontique::Collection::new(parley::fontique::CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    let families = collection.register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let names: Vec<String> = families
        .iter()
        .filter_map(|(id, _)| collection.family_name(*id).map(str::to_string))
        .collect();

    match family_hint {
        Some(hint) => names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(hint))
            .or(names.first())
            .cloned(),
        None => names.into_iter().next(),
    }
}

/// The regular, bold and monospace faces, all required.
#[derive(Clone, Debug)]
pub struct FontSet {
    regular: LoadedFace,
    bold: LoadedFace,
    mono: LoadedFace,
}

impl FontSet {
    /// Resolve every face of `config`. Installed fonts are scanned at most once.
    #[tracing::instrument(skip_all)]
    pub fn load(config: &FontConfig) -> CarouselResult<Self> {
        let mut db: Option<usvg::fontdb::Database> = None;
        let mut load = |face: Face| -> CarouselResult<LoadedFace> {
            let loaded = match config.source(face) {
                FontSource::File { path } => {
                    let bytes = std::fs::read(path).map_err(|e| {
                        CarouselError::font_load(
                            face.name(),
                            format!("read '{}': {e}", path.display()),
                        )
                    })?;
                    LoadedFace::parse(face, bytes, 0, None)?
                }
                FontSource::System { families } => {
                    let db = db.get_or_insert_with(|| {
                        let mut db = usvg::fontdb::Database::new();
                        db.load_system_fonts();
                        tracing::debug!(faces = db.len(), "system fonts scanned");
                        db
                    });
                    let (bytes, index, family) = query_system(db, face, families)?;
                    LoadedFace::parse(face, bytes, index, Some(&family))?
                }
            };
            tracing::debug!(face = face.name(), family = %loaded.family, "font face loaded");
            Ok(loaded)
        };

        Ok(Self {
            regular: load(Face::Regular)?,
            bold: load(Face::Bold)?,
            mono: load(Face::Mono)?,
        })
    }

    /// Build from raw font files already in memory.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>, mono: Vec<u8>) -> CarouselResult<Self> {
        Ok(Self {
            regular: LoadedFace::parse(Face::Regular, regular, 0, None)?,
            bold: LoadedFace::parse(Face::Bold, bold, 0, None)?,
            mono: LoadedFace::parse(Face::Mono, mono, 0, None)?,
        })
    }

    pub fn face(&self, face: Face) -> &LoadedFace {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Mono => &self.mono,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedFace> {
        Face::ALL.into_iter().map(|f| self.face(f))
    }
}

fn query_system(
    db: &usvg::fontdb::Database,
    face: Face,
    families: &[String],
) -> CarouselResult<(Vec<u8>, u32, String)> {
    use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

    let generic = match face {
        Face::Mono => Family::Monospace,
        Face::Regular | Face::Bold => Family::SansSerif,
    };
    let weight = if face.is_bold() {
        Weight::BOLD
    } else {
        Weight::NORMAL
    };

    let candidates = families
        .iter()
        .map(|f| Family::Name(f.as_str()))
        .chain(std::iter::once(generic));

    for family in candidates {
        let query = Query {
            families: std::slice::from_ref(&family),
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        let name = db
            .face(id)
            .and_then(|info| info.families.first().map(|(n, _)| n.clone()))
            .unwrap_or_default();
        if let Some((bytes, index)) = db.with_face_data(id, |data, index| (data.to_vec(), index)) {
            return Ok((bytes, index, name));
        }
    }

    Err(CarouselError::font_load(
        face.name(),
        format!(
            "none of [{}] or the generic fallback is installed",
            families.join(", ")
        ),
    ))
}

/// The DejaVu faces vendored under `tests/data/fonts`.
#[cfg(test)]
pub(crate) fn fixture_font_config() -> FontConfig {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts");
    FontConfig::from_files(
        dir.join("DejaVuSans.ttf"),
        dir.join("DejaVuSans-Bold.ttf"),
        dir.join("DejaVuSansMono.ttf"),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
