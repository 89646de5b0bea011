use std::num::NonZeroUsize;

use crate::paging::ListShape;

/// Paged listings served from fixed-size upstream batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Search,
    ArtistTracks,
    ArtistAlbums,
    LabelAlbums,
}

impl ResourceKind {
    pub const ALL: [Self; 4] = [
        Self::Search,
        Self::ArtistTracks,
        Self::ArtistAlbums,
        Self::LabelAlbums,
    ];

    /// Value of the upstream `type` parameter.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::ArtistTracks => "artistTrackList",
            Self::ArtistAlbums => "artistAlbumList",
            Self::LabelAlbums => "labelAlbumList",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::ArtistTracks => "artist_tracks",
            Self::ArtistAlbums => "artist_albums",
            Self::LabelAlbums => "label_albums",
        }
    }

    /// Where the listed items live in this kind's upstream response.
    pub fn list_shape(&self) -> ListShape {
        match self {
            Self::Search => ListShape::Grouped,
            Self::ArtistTracks | Self::ArtistAlbums | Self::LabelAlbums => ListShape::Flat,
        }
    }

    fn default_batch_size(&self) -> NonZeroUsize {
        let size = match self {
            Self::Search | Self::ArtistTracks => 20,
            Self::ArtistAlbums | Self::LabelAlbums => 40,
        };
        NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN)
    }

    fn env_var(&self) -> &'static str {
        match self {
            Self::Search => "BATCH_SIZE_SEARCH",
            Self::ArtistTracks => "BATCH_SIZE_ARTIST_TRACKS",
            Self::ArtistAlbums => "BATCH_SIZE_ARTIST_ALBUMS",
            Self::LabelAlbums => "BATCH_SIZE_LABEL_ALBUMS",
        }
    }
}

/// Single-entity lookups, returned whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Song,
    Album,
}

impl EntityKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Song => "songDetail",
            Self::Album => "albumDetail",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Album => "album",
        }
    }
}

/// Upstream batch size for each listing kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSizes {
    search: NonZeroUsize,
    artist_tracks: NonZeroUsize,
    artist_albums: NonZeroUsize,
    label_albums: NonZeroUsize,
}

impl BatchSizes {
    pub fn get(&self, kind: ResourceKind) -> NonZeroUsize {
        match kind {
            ResourceKind::Search => self.search,
            ResourceKind::ArtistTracks => self.artist_tracks,
            ResourceKind::ArtistAlbums => self.artist_albums,
            ResourceKind::LabelAlbums => self.label_albums,
        }
    }

    pub fn with(mut self, kind: ResourceKind, size: NonZeroUsize) -> Self {
        let slot = match kind {
            ResourceKind::Search => &mut self.search,
            ResourceKind::ArtistTracks => &mut self.artist_tracks,
            ResourceKind::ArtistAlbums => &mut self.artist_albums,
            ResourceKind::LabelAlbums => &mut self.label_albums,
        };
        *slot = size;
        self
    }

    /// Defaults overridden by `BATCH_SIZE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut sizes = Self::default();
        for kind in ResourceKind::ALL {
            let name = kind.env_var();
            let Some(raw) = lookup(name) else {
                continue;
            };
            match raw.trim().parse::<NonZeroUsize>() {
                Ok(size) => sizes = sizes.with(kind, size),
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", name, raw),
            }
        }
        sizes
    }
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            search: ResourceKind::Search.default_batch_size(),
            artist_tracks: ResourceKind::ArtistTracks.default_batch_size(),
            artist_albums: ResourceKind::ArtistAlbums.default_batch_size(),
            label_albums: ResourceKind::LabelAlbums.default_batch_size(),
        }
    }
}
